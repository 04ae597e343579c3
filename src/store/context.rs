//! Owner of the data directory and the open store handles.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use super::SharedPreferences;
use crate::config::PrefsConfig;
use crate::error::Result;

/// Process-level handle that opens named stores lazily and caches them.
///
/// Every call to [`preferences`](Context::preferences) with the same name
/// returns a handle to the same store. Clones of a `Context` share the cache.
#[derive(Debug, Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

#[derive(Debug)]
struct ContextInner {
    data_dir: PathBuf,
    default_store: String,
    stores: Mutex<HashMap<String, SharedPreferences>>,
}

impl Context {
    /// Name of the store used by the typed accessor factories.
    pub const DEFAULT_STORE: &'static str = "shared_preferences";

    /// Create a context rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_default_store(data_dir, Self::DEFAULT_STORE)
    }

    /// Create a context whose accessor factories bind to `store`.
    pub fn with_default_store(data_dir: impl Into<PathBuf>, store: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                data_dir: data_dir.into(),
                default_store: store.into(),
                stores: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Create a context from resolved configuration.
    pub fn from_config(config: &PrefsConfig) -> Self {
        Self::with_default_store(config.resolved_data_dir(), config.store_name.clone())
    }

    /// Directory holding the store files.
    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }

    /// Name of the store the accessor factories bind to.
    pub fn default_store(&self) -> &str {
        &self.inner.default_store
    }

    /// Get the store `name`, opening it on first access.
    pub fn preferences(&self, name: &str) -> Result<SharedPreferences> {
        let mut stores = self
            .inner
            .stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(prefs) = stores.get(name) {
            return Ok(prefs.clone());
        }

        let prefs = SharedPreferences::open(&self.inner.data_dir, name)?;
        stores.insert(name.to_string(), prefs.clone());
        Ok(prefs)
    }

    /// Get the default store.
    pub fn default_preferences(&self) -> Result<SharedPreferences> {
        self.preferences(self.default_store())
    }
}
