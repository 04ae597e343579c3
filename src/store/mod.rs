//! The underlying key-value store.
//!
//! This module provides a flat, durable key-value container
//! supporting int, long, float, bool, string and string-set values. Each
//! named store lives in one YAML file under the context's data directory.
//!
//! - [`Context`] - opens and caches named stores
//! - [`SharedPreferences`] - typed getters and membership tests
//! - [`Editor`] - batched, explicitly committed changes

pub mod context;
pub mod editor;
pub mod preferences;
pub mod value;

pub use context::Context;
pub use editor::Editor;
pub use preferences::SharedPreferences;
pub use value::{PrefValue, ValueKind};
