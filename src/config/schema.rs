//! Configuration schema.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::store::Context;

/// Settings for locating the preference stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefsConfig {
    /// Directory holding the store files. Platform data dir when unset.
    pub data_dir: Option<PathBuf>,

    /// Store the typed accessors bind to.
    pub store_name: String,
}

impl Default for PrefsConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            store_name: Context::DEFAULT_STORE.to_string(),
        }
    }
}

impl PrefsConfig {
    /// Apply command-line or environment overrides.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, store_name: Option<String>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = Some(dir);
        }
        if let Some(name) = store_name {
            self.store_name = name;
        }
        self
    }

    /// The data directory to use, falling back to the platform default.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(super::default_data_dir)
    }
}
