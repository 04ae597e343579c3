//! The named, durable key-value container.
//!
//! A [`SharedPreferences`] handle wraps one YAML file on disk plus an
//! in-memory copy of its entries. Reads are served from memory. Writes go
//! through an [`Editor`] and are persisted on [`Editor::commit`].
//!
//! Handles are shared process-wide: opening the same file twice while a
//! handle is alive returns that handle. Commits take an exclusive lock on a
//! `<name>.yml.lock` sidecar and re-read the file before applying changes,
//! so writers in other processes do not lose each other's keys.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, PoisonError, RwLock, RwLockReadGuard, Weak};

use tempfile::NamedTempFile;

use super::{Editor, PrefValue, ValueKind};
use crate::error::{PrefError, Result};

/// Handle to a named preference store.
///
/// Cloning the handle is cheap; all clones share the same entries.
#[derive(Debug, Clone)]
pub struct SharedPreferences {
    inner: Arc<Inner>,
}

/// Live handles keyed by absolute file path.
static OPEN_STORES: LazyLock<Mutex<HashMap<PathBuf, Weak<Inner>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

#[derive(Debug)]
struct Inner {
    name: String,
    path: PathBuf,
    entries: RwLock<BTreeMap<String, PrefValue>>,
}

/// On-disk representation of a store.
#[derive(Debug, Deserialize)]
struct StoreFile {
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, PrefValue>,
}

#[derive(Serialize)]
struct StoreFileRef<'a> {
    version: u32,
    entries: &'a BTreeMap<String, PrefValue>,
}

impl SharedPreferences {
    /// Current file format version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Open the store `name` inside `dir`, loading any existing entries.
    ///
    /// A missing file is an empty store. The file is only created by the
    /// first commit. If the store is already open in this process, the
    /// existing handle is returned.
    pub fn open(dir: impl AsRef<Path>, name: &str) -> Result<Self> {
        let path = Self::file_path(dir.as_ref(), name)?;
        let registry_key = std::path::absolute(&path).unwrap_or_else(|_| path.clone());

        let mut open = OPEN_STORES.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(inner) = open.get(&registry_key).and_then(Weak::upgrade) {
            return Ok(Self { inner });
        }
        open.retain(|_, handle| handle.strong_count() > 0);

        let entries = Self::load(&path)?;

        tracing::debug!(
            "Opened preference store '{}' at {:?} ({} entries)",
            name,
            path,
            entries.len()
        );

        let inner = Arc::new(Inner {
            name: name.to_string(),
            path,
            entries: RwLock::new(entries),
        });
        open.insert(registry_key, Arc::downgrade(&inner));
        Ok(Self { inner })
    }

    /// Get the file path for store `name` inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty or would escape `dir`.
    pub fn file_path(dir: &Path, name: &str) -> Result<PathBuf> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);
        if !valid {
            return Err(PrefError::StorageUnavailable {
                path: dir.to_path_buf(),
                message: format!("invalid store name '{}'", name),
            });
        }
        Ok(dir.join(format!("{}.yml", name)))
    }

    fn load(path: &Path) -> Result<BTreeMap<String, PrefValue>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(path).map_err(|e| unavailable(path, e))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let file: StoreFile = serde_yaml::from_str(&content).map_err(|e| unavailable(path, e))?;
        if file.version > Self::CURRENT_VERSION {
            return Err(unavailable(
                path,
                format!("unsupported store version {}", file.version),
            ));
        }

        Ok(file.entries)
    }

    /// Re-read the backing file.
    pub(super) fn load_from_disk(&self) -> Result<BTreeMap<String, PrefValue>> {
        Self::load(&self.inner.path)
    }

    /// Take the exclusive cross-process write lock for this store.
    ///
    /// The lock is released when the returned file is dropped.
    pub(super) fn lock_exclusive(&self) -> Result<File> {
        let lock_path = self.inner.path.with_extension("yml.lock");
        let dir = parent_dir(&lock_path);
        fs::create_dir_all(dir).map_err(|e| unavailable(dir, e))?;

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| unavailable(&lock_path, e))?;
        file.lock().map_err(|e| unavailable(&lock_path, e))?;
        Ok(file)
    }

    /// Write `entries` to disk using atomic write.
    ///
    /// Each write goes to its own temp file in the store's directory, which
    /// is then renamed over the store file, so the file is never partially
    /// written.
    pub(super) fn persist(&self, entries: &BTreeMap<String, PrefValue>) -> Result<()> {
        let path = &self.inner.path;
        let dir = parent_dir(path);
        fs::create_dir_all(dir).map_err(|e| unavailable(dir, e))?;

        let content = serde_yaml::to_string(&StoreFileRef {
            version: Self::CURRENT_VERSION,
            entries,
        })
        .map_err(|e| unavailable(path, format!("failed to serialize store: {}", e)))?;

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| unavailable(dir, e))?;
        temp.write_all(content.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| unavailable(temp.path(), e))?;
        temp.persist(path).map_err(|e| unavailable(path, e))?;

        Ok(())
    }

    /// Name of the store.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    pub(super) fn entries(&self) -> &RwLock<BTreeMap<String, PrefValue>> {
        &self.inner.entries
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, BTreeMap<String, PrefValue>> {
        self.inner
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Check whether the store holds a value for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.read_entries().contains_key(key)
    }

    /// Get the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<PrefValue> {
        self.read_entries().get(key).cloned()
    }

    /// Snapshot of every entry, sorted by key.
    pub fn all(&self) -> BTreeMap<String, PrefValue> {
        self.read_entries().clone()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    /// Start a batch of changes. Nothing is written until the editor is
    /// committed.
    pub fn edit(&self) -> Editor {
        Editor::new(self.clone())
    }

    fn find_typed<T>(
        &self,
        key: &str,
        expected: ValueKind,
        extract: impl FnOnce(&PrefValue) -> Option<T>,
    ) -> Result<Option<T>> {
        let entries = self.read_entries();
        match entries.get(key) {
            None => Ok(None),
            Some(value) => extract(value)
                .map(Some)
                .ok_or_else(|| PrefError::TypeMismatch {
                    key: key.to_string(),
                    expected,
                    found: value.kind(),
                }),
        }
    }

    /// Get an int, or `None` if `key` is absent.
    ///
    /// Presence and value are read under one lock, so a concurrent commit
    /// never turns an absent key into a default.
    ///
    /// # Errors
    ///
    /// Returns [`PrefError::TypeMismatch`] if `key` holds another type.
    pub fn find_int(&self, key: &str) -> Result<Option<i32>> {
        self.find_typed(key, ValueKind::Int, PrefValue::as_int)
    }

    /// Get a long, or `None` if `key` is absent.
    pub fn find_long(&self, key: &str) -> Result<Option<i64>> {
        self.find_typed(key, ValueKind::Long, PrefValue::as_long)
    }

    /// Get a float, or `None` if `key` is absent.
    pub fn find_float(&self, key: &str) -> Result<Option<f32>> {
        self.find_typed(key, ValueKind::Float, PrefValue::as_float)
    }

    /// Get a bool, or `None` if `key` is absent.
    pub fn find_bool(&self, key: &str) -> Result<Option<bool>> {
        self.find_typed(key, ValueKind::Bool, PrefValue::as_bool)
    }

    /// Get a string, or `None` if `key` is absent.
    pub fn find_string(&self, key: &str) -> Result<Option<String>> {
        self.find_typed(key, ValueKind::String, |v| v.as_str().map(str::to_string))
    }

    /// Get a string set, or `None` if `key` is absent.
    pub fn find_string_set(&self, key: &str) -> Result<Option<BTreeSet<String>>> {
        self.find_typed(key, ValueKind::StringSet, |v| v.as_string_set().cloned())
    }

    /// Get an int, or `default` if `key` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`PrefError::TypeMismatch`] if `key` holds another type.
    pub fn get_int(&self, key: &str, default: i32) -> Result<i32> {
        Ok(self.find_int(key)?.unwrap_or(default))
    }

    /// Get a long, or `default` if `key` is absent.
    pub fn get_long(&self, key: &str, default: i64) -> Result<i64> {
        Ok(self.find_long(key)?.unwrap_or(default))
    }

    /// Get a float, or `default` if `key` is absent.
    pub fn get_float(&self, key: &str, default: f32) -> Result<f32> {
        Ok(self.find_float(key)?.unwrap_or(default))
    }

    /// Get a bool, or `default` if `key` is absent.
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        Ok(self.find_bool(key)?.unwrap_or(default))
    }

    /// Get a string, or `default` if `key` is absent.
    pub fn get_string(&self, key: &str, default: String) -> Result<String> {
        Ok(self.find_string(key)?.unwrap_or(default))
    }

    /// Get a string set, or `default` if `key` is absent.
    pub fn get_string_set(&self, key: &str, default: BTreeSet<String>) -> Result<BTreeSet<String>> {
        Ok(self.find_string_set(key)?.unwrap_or(default))
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn unavailable(path: &Path, err: impl Display) -> PrefError {
    PrefError::StorageUnavailable {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let prefs = SharedPreferences::open(temp.path(), "shared_preferences").unwrap();

        assert!(prefs.is_empty());
        assert_eq!(prefs.name(), "shared_preferences");
        assert!(!prefs.path().exists());
    }

    #[test]
    fn file_path_rejects_bad_names() {
        let temp = TempDir::new().unwrap();
        assert!(SharedPreferences::file_path(temp.path(), "").is_err());
        assert!(SharedPreferences::file_path(temp.path(), "..").is_err());
        assert!(SharedPreferences::file_path(temp.path(), "a/b").is_err());

        let path = SharedPreferences::file_path(temp.path(), "prefs").unwrap();
        assert!(path.ends_with("prefs.yml"));
    }

    #[test]
    fn getters_return_default_for_absent_key() {
        let temp = TempDir::new().unwrap();
        let prefs = SharedPreferences::open(temp.path(), "prefs").unwrap();

        assert_eq!(prefs.get_int("id", 5).unwrap(), 5);
        assert_eq!(prefs.get_long("dob", -1).unwrap(), -1);
        assert_eq!(prefs.get_string("name", "x".into()).unwrap(), "x");
        assert!(!prefs.get_bool("dev", false).unwrap());
    }

    #[test]
    fn getter_with_wrong_type_fails_fast() {
        let temp = TempDir::new().unwrap();
        let prefs = SharedPreferences::open(temp.path(), "prefs").unwrap();
        prefs.edit().put_int("id", 7).commit().unwrap();

        let err = prefs.get_string("id", String::new()).unwrap_err();
        match err {
            PrefError::TypeMismatch {
                key,
                expected,
                found,
            } => {
                assert_eq!(key, "id");
                assert_eq!(expected, ValueKind::String);
                assert_eq!(found, ValueKind::Int);
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn committed_values_survive_reopen() {
        let temp = TempDir::new().unwrap();
        {
            let prefs = SharedPreferences::open(temp.path(), "prefs").unwrap();
            prefs
                .edit()
                .put_int("id", 7)
                .put_float("charge", 70.0)
                .put_string("first_name", "John")
                .commit()
                .unwrap();
        }

        let reopened = SharedPreferences::open(temp.path(), "prefs").unwrap();
        assert_eq!(reopened.len(), 3);
        assert_eq!(reopened.get_int("id", 0).unwrap(), 7);
        assert_eq!(reopened.get_float("charge", 0.0).unwrap(), 70.0);
        assert_eq!(reopened.get_string("first_name", String::new()).unwrap(), "John");
    }

    #[test]
    fn persist_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let prefs = SharedPreferences::open(temp.path(), "prefs").unwrap();
        prefs.edit().put_bool("is_dev", true).commit().unwrap();

        let mut names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["prefs.yml", "prefs.yml.lock"]);
    }

    #[test]
    fn find_distinguishes_absent_from_zero() {
        let temp = TempDir::new().unwrap();
        let prefs = SharedPreferences::open(temp.path(), "prefs").unwrap();
        assert_eq!(prefs.find_bool("is_dev").unwrap(), None);

        prefs.edit().put_bool("is_dev", false).commit().unwrap();
        assert_eq!(prefs.find_bool("is_dev").unwrap(), Some(false));
        assert!(prefs.find_string("is_dev").is_err());
    }

    #[test]
    fn open_twice_returns_live_handle() {
        let temp = TempDir::new().unwrap();
        let first = SharedPreferences::open(temp.path(), "prefs").unwrap();
        let second = SharedPreferences::open(temp.path(), "prefs").unwrap();

        first.edit().put_int("id", 7).commit().unwrap();
        assert_eq!(second.find_int("id").unwrap(), Some(7));
    }

    #[test]
    fn reopen_after_drop_reads_disk() {
        let temp = TempDir::new().unwrap();
        {
            let prefs = SharedPreferences::open(temp.path(), "prefs").unwrap();
            prefs.edit().put_int("id", 7).commit().unwrap();
        }
        fs::write(
            temp.path().join("prefs.yml"),
            "version: 1\nentries:\n  id:\n    type: int\n    value: 9\n",
        )
        .unwrap();

        let prefs = SharedPreferences::open(temp.path(), "prefs").unwrap();
        assert_eq!(prefs.find_int("id").unwrap(), Some(9));
    }

    #[test]
    fn corrupt_file_is_storage_unavailable() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("prefs.yml"), "entries: [not, a, map").unwrap();

        let err = SharedPreferences::open(temp.path(), "prefs").unwrap_err();
        assert!(matches!(err, PrefError::StorageUnavailable { .. }));
    }

    #[test]
    fn newer_version_is_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("prefs.yml"), "version: 99\nentries: {}\n").unwrap();

        let err = SharedPreferences::open(temp.path(), "prefs").unwrap_err();
        assert!(err.to_string().contains("unsupported store version 99"));
    }

    #[test]
    fn reads_hand_written_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("prefs.yml"),
            "version: 1\nentries:\n  children:\n    type: string_set\n    value: [Niu, Milly]\n",
        )
        .unwrap();

        let prefs = SharedPreferences::open(temp.path(), "prefs").unwrap();
        let children = prefs.get_string_set("children", BTreeSet::new()).unwrap();
        assert_eq!(children.len(), 2);
        assert!(children.contains("Milly"));
        assert!(children.contains("Niu"));
    }

    #[test]
    fn clones_share_entries() {
        let temp = TempDir::new().unwrap();
        let prefs = SharedPreferences::open(temp.path(), "prefs").unwrap();
        let other = prefs.clone();

        prefs.edit().put_long("date_of_birth", 11607356).commit().unwrap();
        assert!(other.contains("date_of_birth"));
        assert_eq!(
            other.get("date_of_birth"),
            Some(PrefValue::Long(11607356))
        );
    }
}
