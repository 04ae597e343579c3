//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use super::PrefsConfig;
use crate::error::{PrefError, Result};

/// Location of the user's config file: `<config_dir>/prefstore/config.yml`.
pub fn default_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("prefstore").join("config.yml"))
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PrefsConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PrefError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PrefError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`PrefsConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PrefsConfig> {
    if content.trim().is_empty() {
        return Ok(PrefsConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| PrefError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit path must exist. Without one, the default location is used
/// if present and defaults apply otherwise.
pub fn load_config(config_override: Option<&Path>) -> Result<PrefsConfig> {
    if let Some(path) = config_override {
        return load_config_file(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            tracing::debug!("Loading config from {:?}", path);
            load_config_file(&path)
        }
        _ => Ok(PrefsConfig::default()),
    }
}
