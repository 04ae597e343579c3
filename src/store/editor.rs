//! Transactional edits against a [`SharedPreferences`] store.

use std::collections::BTreeSet;
use std::sync::PoisonError;

use super::{PrefValue, SharedPreferences};
use crate::error::Result;

/// A batch of pending changes to one store.
///
/// Changes are only visible after [`commit`](Editor::commit). Within a
/// commit, [`clear`](Editor::clear) is applied first, then puts and removes
/// in the order they were made. Dropping an editor without committing
/// discards its changes.
#[derive(Debug)]
pub struct Editor {
    prefs: SharedPreferences,
    clear: bool,
    pending: Vec<(String, Option<PrefValue>)>,
}

impl Editor {
    pub(super) fn new(prefs: SharedPreferences) -> Self {
        Self {
            prefs,
            clear: false,
            pending: Vec::new(),
        }
    }

    fn put(&mut self, key: &str, value: PrefValue) -> &mut Self {
        self.pending.push((key.to_string(), Some(value)));
        self
    }

    pub fn put_int(&mut self, key: &str, value: i32) -> &mut Self {
        self.put(key, PrefValue::Int(value))
    }

    pub fn put_long(&mut self, key: &str, value: i64) -> &mut Self {
        self.put(key, PrefValue::Long(value))
    }

    pub fn put_float(&mut self, key: &str, value: f32) -> &mut Self {
        self.put(key, PrefValue::Float(value))
    }

    pub fn put_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.put(key, PrefValue::Bool(value))
    }

    pub fn put_string(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.put(key, PrefValue::String(value.into()))
    }

    pub fn put_string_set(&mut self, key: &str, value: BTreeSet<String>) -> &mut Self {
        self.put(key, PrefValue::StringSet(value))
    }

    /// Mark `key` for removal.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.pending.push((key.to_string(), None));
        self
    }

    /// Remove every entry in the store.
    pub fn clear(&mut self) -> &mut Self {
        self.clear = true;
        self
    }

    /// Number of pending puts and removes.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn has_changes(&self) -> bool {
        self.clear || !self.pending.is_empty()
    }

    /// Apply the pending changes and persist them.
    ///
    /// The store's write lock and its cross-process file lock are held for
    /// the whole commit. Changes are applied on top of the file as it is on
    /// disk, so keys written by other processes survive. If persisting
    /// fails, neither the file nor the in-memory entries change.
    pub fn commit(&mut self) -> Result<()> {
        let mut entries = self
            .prefs
            .entries()
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let _file_lock = self.prefs.lock_exclusive()?;

        let mut next = if self.clear {
            Default::default()
        } else {
            self.prefs.load_from_disk()?
        };
        for (key, value) in &self.pending {
            match value {
                Some(value) => {
                    next.insert(key.clone(), value.clone());
                }
                None => {
                    next.remove(key);
                }
            }
        }

        self.prefs.persist(&next)?;
        *entries = next;
        drop(entries);

        tracing::debug!(
            "Committed {} change(s){} to '{}'",
            self.pending.len(),
            if self.clear { " after clear" } else { "" },
            self.prefs.name()
        );

        self.pending.clear();
        self.clear = false;
        Ok(())
    }
}

impl Drop for Editor {
    fn drop(&mut self) {
        if self.has_changes() {
            tracing::warn!(
                "Discarding {} uncommitted change(s) to '{}'",
                self.pending.len(),
                self.prefs.name()
            );
        }
    }
}
