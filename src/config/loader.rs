// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Environment variable that overrides the default task file location.
pub const CONFIG_ENV: &str = "TASKDAG_CONFIG";

const DEFAULT_FILE_NAME: &str = "Taskdag.toml";

/// Read and deserialize a task file. No semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawConfigFile = toml::from_str(&contents)?;
    debug!(path = %path.display(), tasks = raw.task.len(), "loaded task file");

    Ok(raw)
}

/// Read a task file and run every check in [`validate_config`](crate::config::validate_config):
/// names, references, `default_tasks` and cycles.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    ConfigFile::try_from(load_from_path(path)?)
}

/// Task file used when `--config` is not given.
///
/// `TASKDAG_CONFIG` wins if set and non-empty, otherwise `Taskdag.toml` in
/// the current directory.
pub fn default_config_path() -> PathBuf {
    resolve_config_path(None, std::env::var(CONFIG_ENV).ok().as_deref())
}

/// Pick the task file from an explicit path, then the environment value,
/// then the default file name.
pub fn resolve_config_path(explicit: Option<&Path>, env_value: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match env_value.map(str::trim) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_FILE_NAME),
    }
}
