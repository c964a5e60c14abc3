use crate::api::ArchpmApi;
use crate::config::ArchpmConfig;
use crate::error::{ArchpmError, Result};
use crate::store::Database;
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Overrides the data directory (config file and default database).
pub const HOME_ENV: &str = "ARCHPM_HOME";

pub struct ArchpmContext {
    pub api: ArchpmApi,
    pub config: ArchpmConfig,
}

/// `$ARCHPM_HOME` when set, otherwise the platform data directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "archpm", "archpm")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ArchpmError::Api("Could not determine data directory".to_string()))
}

/// Resolves the data directory, the config and the database path.
///
/// The database is `db_override` when given, else the config's `database`
/// entry, else `archpm.db` in the data directory.
pub fn initialize(db_override: Option<PathBuf>) -> Result<ArchpmContext> {
    let data_dir = data_dir()?;
    fs::create_dir_all(&data_dir)?;

    let config = match ArchpmConfig::load(&data_dir) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable config");
            ArchpmConfig::default()
        }
    };

    let db_path = db_override.unwrap_or_else(|| config.database_path(&data_dir));
    let api = ArchpmApi::new(Database::new(db_path), &data_dir);
    debug!(
        data_dir = %data_dir.display(),
        database = %api.database().path().display(),
        "initialized"
    );

    Ok(ArchpmContext { api, config })
}
