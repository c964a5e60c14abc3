use crate::error::{ArchpmError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_DB_FILENAME: &str = "archpm.db";

/// Configuration for archpm, stored as `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchpmConfig {
    /// Database file. Relative paths resolve against the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Ask before deleting a record from the command line.
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
}

fn default_confirm_delete() -> bool {
    true
}

impl Default for ArchpmConfig {
    fn default() -> Self {
        Self {
            database: None,
            confirm_delete: default_confirm_delete(),
        }
    }
}

impl ArchpmConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ArchpmConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Database path for this config, anchored at `data_dir`.
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        match &self.database {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => data_dir.join(path),
            None => data_dir.join(DEFAULT_DB_FILENAME),
        }
    }

    /// Current value of a key, rendered as text.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "database" => Ok(self
                .database
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            "confirm-delete" => Ok(self.confirm_delete.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "database" => {
                self.database = if value.trim().is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value.trim()))
                };
                Ok(())
            }
            "confirm-delete" => {
                self.confirm_delete = value.trim().parse().map_err(|_| {
                    ArchpmError::Api(format!("confirm-delete expects true or false, got '{}'", value))
                })?;
                Ok(())
            }
            other => Err(unknown_key(other)),
        }
    }

    pub fn keys() -> &'static [&'static str] {
        &["database", "confirm-delete"]
    }
}

fn unknown_key(key: &str) -> ArchpmError {
    ArchpmError::Api(format!("Unknown config key: {}", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ArchpmConfig::load(dir.path()).unwrap();
        assert_eq!(config, ArchpmConfig::default());
        assert!(config.confirm_delete);
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data");
        let mut config = ArchpmConfig::default();
        config.set("database", "office.db").unwrap();
        config.set("confirm-delete", "false").unwrap();
        config.save(&nested).unwrap();

        let loaded = ArchpmConfig::load(&nested).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.database_path(&nested), nested.join("office.db"));
    }

    #[test]
    fn database_path_defaults_into_data_dir() {
        let config = ArchpmConfig::default();
        assert_eq!(
            config.database_path(Path::new("/data")),
            PathBuf::from("/data/archpm.db")
        );
    }

    #[test]
    fn absolute_database_path_wins() {
        let mut config = ArchpmConfig::default();
        config.set("database", "/srv/shared.db").unwrap();
        assert_eq!(
            config.database_path(Path::new("/data")),
            PathBuf::from("/srv/shared.db")
        );
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        let mut config = ArchpmConfig::default();
        assert!(config.set("colour", "red").is_err());
        assert!(config.get("colour").is_err());
        assert!(config.set("confirm-delete", "sometimes").is_err());
    }

    #[test]
    fn tolerates_partial_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{}").unwrap();
        assert_eq!(ArchpmConfig::load(dir.path()).unwrap(), ArchpmConfig::default());
    }
}
