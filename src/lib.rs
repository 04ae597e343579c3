//! prefstore - Typed, durable key-value preferences.
//!
//! A small preference store with one typed accessor per key. Values live in
//! a named store under a data directory and are read back with their type,
//! or as `None` when the key was never written.
//!
//! # Modules
//!
//! - [`accessor`] - Typed accessors bound to a single key
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading
//! - [`double`] - Bit-exact storage of doubles in a long slot
//! - [`error`] - Error types and result aliases
//! - [`keys`] - Known key names
//! - [`profile`] - The sample user profile
//! - [`store`] - The underlying durable key-value store
//!
//! # Example
//!
//! ```
//! use prefstore::{keys, Context};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let ctx = Context::new(temp.path());
//!
//! let balance = ctx.double_pref(keys::BALANCE);
//! assert_eq!(balance.read().unwrap(), None);
//!
//! balance.set(25659.72).unwrap();
//! assert_eq!(balance.read().unwrap(), Some(25659.72));
//! ```

pub mod accessor;
pub mod cli;
pub mod config;
pub mod double;
pub mod error;
pub mod keys;
pub mod profile;
pub mod store;

pub use accessor::{Pref, PrefType};
pub use error::{PrefError, Result};
pub use profile::{Profile, ProfileSnapshot};
pub use store::{Context, Editor, PrefValue, SharedPreferences, ValueKind};
