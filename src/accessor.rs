//! Typed accessors bound to a single key.
//!
//! A [`Pref<T>`] pairs one key with a value type, a default and the
//! getter/setter functions for that type. Reads return `None` for a key
//! that was never written, so "unset" and "set to the zero value" stay
//! distinguishable.
//!
//! # Example
//!
//! ```no_run
//! use prefstore::{keys, Context};
//!
//! let ctx = Context::new("/tmp/prefs");
//! let id = ctx.int_pref(keys::ID);
//!
//! id.set(7)?;
//! assert_eq!(id.read()?, Some(7));
//!
//! id.clear()?;
//! assert_eq!(id.read()?, None);
//! # Ok::<(), prefstore::PrefError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use crate::double::{find_double, put_double};
use crate::error::Result;
use crate::store::{Context, Editor, SharedPreferences, ValueKind};

/// Reads a value, or `None` when the key is absent.
pub type Getter<T> = fn(&SharedPreferences, &str) -> Result<Option<T>>;

/// Stages a value on an editor.
pub type Setter<T> = for<'e> fn(&'e mut Editor, &str, T) -> &'e mut Editor;

/// Logical type of a preference, as seen by accessor users.
///
/// Unlike [`ValueKind`] this includes `Double`, which is stored as a long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PrefType {
    Int,
    Long,
    Float,
    Double,
    Bool,
    String,
    StringSet,
}

impl PrefType {
    /// The raw type the store uses for this logical type.
    pub fn raw_kind(self) -> ValueKind {
        match self {
            PrefType::Int => ValueKind::Int,
            PrefType::Long | PrefType::Double => ValueKind::Long,
            PrefType::Float => ValueKind::Float,
            PrefType::Bool => ValueKind::Bool,
            PrefType::String => ValueKind::String,
            PrefType::StringSet => ValueKind::StringSet,
        }
    }
}

impl fmt::Display for PrefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrefType::Int => "int",
            PrefType::Long => "long",
            PrefType::Float => "float",
            PrefType::Double => "double",
            PrefType::Bool => "bool",
            PrefType::String => "string",
            PrefType::StringSet => "string_set",
        };
        f.write_str(name)
    }
}

/// A readable and writable slot for one key of one type.
///
/// The backing store is resolved through the [`Context`] on first use.
pub struct Pref<T> {
    context: Context,
    store_name: String,
    store: OnceLock<SharedPreferences>,
    key: String,
    default: T,
    getter: Getter<T>,
    setter: Setter<T>,
}

impl<T: fmt::Debug> fmt::Debug for Pref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pref")
            .field("store", &self.store_name)
            .field("key", &self.key)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

impl<T: Clone> Pref<T> {
    /// Bind `key` in the context's default store.
    pub fn new(
        context: &Context,
        key: impl Into<String>,
        default: T,
        getter: Getter<T>,
        setter: Setter<T>,
    ) -> Self {
        Self {
            context: context.clone(),
            store_name: context.default_store().to_string(),
            store: OnceLock::new(),
            key: key.into(),
            default,
            getter,
            setter,
        }
    }

    /// Bind to the store `name` instead of the context's default store.
    pub fn in_store(mut self, name: impl Into<String>) -> Self {
        self.store_name = name.into();
        self.store = OnceLock::new();
        self
    }

    /// Key this accessor reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value returned by [`get_or_default`](Pref::get_or_default) when unset.
    pub fn default_value(&self) -> &T {
        &self.default
    }

    fn store(&self) -> Result<&SharedPreferences> {
        if let Some(store) = self.store.get() {
            return Ok(store);
        }
        let store = self.context.preferences(&self.store_name)?;
        Ok(self.store.get_or_init(|| store))
    }

    /// Read the value, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened or the key holds a
    /// value of another type.
    pub fn read(&self) -> Result<Option<T>> {
        (self.getter)(self.store()?, &self.key)
    }

    /// Write `Some(value)`, or remove the key for `None`.
    ///
    /// The change is committed before this returns.
    pub fn write(&self, value: Option<T>) -> Result<()> {
        let store = self.store()?;
        let mut editor = store.edit();
        match value {
            Some(value) => {
                (self.setter)(&mut editor, &self.key, value);
            }
            None => {
                editor.remove(&self.key);
            }
        }
        editor.commit()
    }

    /// Store `value` and commit.
    pub fn set(&self, value: T) -> Result<()> {
        self.write(Some(value))
    }

    /// Remove the key and commit. Later reads return `None`.
    pub fn clear(&self) -> Result<()> {
        self.write(None)
    }

    /// Whether the key currently holds a value.
    pub fn is_set(&self) -> Result<bool> {
        Ok(self.store()?.contains(&self.key))
    }

    /// Read the value, falling back to the accessor's default.
    pub fn get_or_default(&self) -> Result<T> {
        Ok(self.read()?.unwrap_or_else(|| self.default.clone()))
    }
}

fn put_string<'e>(editor: &'e mut Editor, key: &str, value: String) -> &'e mut Editor {
    editor.put_string(key, value)
}

/// Factories binding a key to each supported type in the default store.
impl Context {
    /// An `i32` accessor, defaulting to `0`.
    pub fn int_pref(&self, key: impl Into<String>) -> Pref<i32> {
        Pref::new(
            self,
            key,
            0,
            SharedPreferences::find_int,
            Editor::put_int,
        )
    }

    /// An `i64` accessor, defaulting to `0`.
    pub fn long_pref(&self, key: impl Into<String>) -> Pref<i64> {
        Pref::new(
            self,
            key,
            0,
            SharedPreferences::find_long,
            Editor::put_long,
        )
    }

    /// An `f32` accessor, defaulting to `0.0`.
    pub fn float_pref(&self, key: impl Into<String>) -> Pref<f32> {
        Pref::new(
            self,
            key,
            0.0,
            SharedPreferences::find_float,
            Editor::put_float,
        )
    }

    /// Doubles are stored as their bit pattern in a long slot.
    pub fn double_pref(&self, key: impl Into<String>) -> Pref<f64> {
        Pref::new(self, key, 0.0, find_double, put_double)
    }

    /// A `bool` accessor, defaulting to `false`.
    pub fn bool_pref(&self, key: impl Into<String>) -> Pref<bool> {
        Pref::new(
            self,
            key,
            false,
            SharedPreferences::find_bool,
            Editor::put_bool,
        )
    }

    /// A `String` accessor, defaulting to the empty string.
    pub fn string_pref(&self, key: impl Into<String>) -> Pref<String> {
        Pref::new(
            self,
            key,
            String::new(),
            SharedPreferences::find_string,
            put_string,
        )
    }

    /// A string set accessor, defaulting to the empty set.
    pub fn string_set_pref(&self, key: impl Into<String>) -> Pref<BTreeSet<String>> {
        Pref::new(
            self,
            key,
            BTreeSet::new(),
            SharedPreferences::find_string_set,
            Editor::put_string_set,
        )
    }
}
