//! Configuration loading from file and environment

use std::path::{Path, PathBuf};

use super::types::ExclusionsConfig;
use crate::error::{Error, Result};

/// Environment variable overriding the exclusion config path
pub const CONFIG_ENV_VAR: &str = "VEIL_EXCLUSIONS";

/// Default project-local exclusion config path
pub const DEFAULT_CONFIG_PATH: &str = ".veil/exclusions.toml";

/// Resolve the exclusion config path
///
/// `VEIL_EXCLUSIONS` wins when set (and non-empty); otherwise the
/// project-local default is used.
#[must_use]
pub fn config_path() -> PathBuf {
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_CONFIG_PATH),
    }
}

/// Load an exclusion config file
///
/// A missing file is not an error: it loads as the empty config, meaning
/// "explicitly, there is nothing to exclude".
///
/// # Errors
///
/// Returns error if:
/// - The path exists but is a directory
/// - The file cannot be read
/// - The TOML is malformed
pub fn load_exclusions(path: &Path) -> Result<ExclusionsConfig> {
    if !path.exists() {
        return Ok(ExclusionsConfig::default());
    }

    if path.is_dir() {
        return Err(Error::invalid_config(format!(
            "exclusion config path is a directory, not a file: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
