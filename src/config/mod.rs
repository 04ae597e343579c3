//! Configuration loading.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Resolution Order
//!
//! 1. `--data-dir` / `PREFSTORE_DATA_DIR` and `--store`
//! 2. Config file (`--config`, or `<config_dir>/prefstore/config.yml`)
//! 3. Defaults: `<data_dir>/prefstore` and the `shared_preferences` store

pub mod loader;
pub mod schema;

pub use loader::{default_config_path, load_config, load_config_file, parse_config};
pub use schema::PrefsConfig;

use std::path::PathBuf;

/// Get the default directory for store files.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("prefstore")
}
