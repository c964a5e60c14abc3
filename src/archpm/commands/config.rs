use crate::commands::{CmdMessage, CmdResult};
use crate::config::ArchpmConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Reads or edits `config.json` in `config_dir`. Unknown keys and bad
/// values are reported as messages; only file errors come back as `Err`.
pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = ArchpmConfig::load(config_dir)?;
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => match config.get(&key) {
            Ok(value) => Ok(CmdResult::default().with_message(CmdMessage::info(value))),
            Err(e) => Ok(CmdResult::failed(e.to_string())),
        },
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                return Ok(CmdResult::failed(e.to_string()));
            }
            config.save(config_dir)?;
            let shown = config.get(&key).unwrap_or(value);
            Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!("{} set to {}", key, shown)))
                .with_config(config))
        }
    }
}
