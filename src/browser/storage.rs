//! Tab-scoped key/value storage.
//!
//! A [`TabScopedStore`] plays the role of `sessionStorage`: values survive a
//! reload of the same tab and are never shared with another tab.
//!
//! | Type | Lifetime of values |
//! |------|--------------------|
//! | [`MemoryTabStore`] | As long as the store value lives |
//! | [`FileTabStore`] | On disk, one file per tab |

// ============================================================================
// Imports
// ============================================================================

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::error::{Error, Result};

// ============================================================================
// TabScopedStore
// ============================================================================

/// Capability for reading and writing tab-scoped storage.
///
/// Implementations must be safe to share between concurrent requests.
pub trait TabScopedStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage is unavailable.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage is unavailable.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: TabScopedStore + ?Sized> TabScopedStore for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

// ============================================================================
// MemoryTabStore
// ============================================================================

/// In-memory tab storage.
///
/// Share one instance (behind an [`Arc`]) between clients to model reloads
/// of the same tab; use separate instances to model separate tabs.
#[derive(Debug, Default)]
pub struct MemoryTabStore {
    items: RwLock<FxHashMap<String, String>>,
}

impl MemoryTabStore {
    /// Creates an empty store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every value, as closing the tab would.
    pub fn clear(&self) {
        self.items.write().clear();
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl TabScopedStore for MemoryTabStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// FileTabStore
// ============================================================================

/// Tab storage persisted as a JSON object in a single file.
///
/// Intended for native hosts that restart between "reloads" of a tab. Each
/// tab must use its own file. Writes go through a temporary file in the same
/// directory and are renamed into place.
#[derive(Debug)]
pub struct FileTabStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTabStore {
    /// Creates a store backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<FxHashMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(FxHashMap::default()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                Error::storage(format!(
                    "Corrupt tab storage at {}: {e}",
                    self.path.display()
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FxHashMap::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&self, items: &FxHashMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&serde_json::to_vec(items)?)?;
        file.flush()?;
        file.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

impl TabScopedStore for FileTabStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.load()?;
        trace!(
            path = %self.path.display(),
            key = %key,
            found = items.contains_key(key),
            "Read tab storage"
        );
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock();

        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.persist(&items)?;

        debug!(
            path = %self.path.display(),
            key = %key,
            value_len = value.len(),
            "Wrote tab storage"
        );
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
