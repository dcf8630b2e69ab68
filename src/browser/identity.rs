//! Per-tab identity.
//!
//! The identifier is resolved once, synchronously, when a [`TabIdentity`] is
//! constructed. Concurrent requests issued afterwards only read it, so two
//! in-flight requests can never race to generate different identifiers.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, warn};

use crate::identifiers::TabId;
use crate::protocol::TAB_ID_STORAGE_KEY;

use super::storage::TabScopedStore;

// ============================================================================
// TabIdentity
// ============================================================================

/// The identifier of the current tab, resolved from tab-scoped storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabIdentity {
    tab_id: TabId,
}

impl TabIdentity {
    /// Loads the stored identifier or generates and persists a new one.
    #[must_use]
    pub fn new(store: &dyn TabScopedStore) -> Self {
        Self {
            tab_id: Self::resolve(store),
        }
    }

    /// Returns the identifier of this tab.
    #[inline]
    #[must_use]
    pub fn tab_id(&self) -> &TabId {
        &self.tab_id
    }

    /// Reads the identifier from `store`, generating and persisting one if
    /// none exists.
    ///
    /// When `store` is unavailable a fresh identifier is returned without
    /// being persisted. Calling this repeatedly against a broken store
    /// therefore yields a different identifier each time: isolation still
    /// holds, continuity across reloads does not. A warning is logged each
    /// time this happens.
    #[must_use]
    pub fn resolve(store: &dyn TabScopedStore) -> TabId {
        match store.get_item(TAB_ID_STORAGE_KEY) {
            Ok(Some(stored)) if !stored.is_empty() => {
                debug!(tab_id = %stored, "Reusing stored tab id");
                return TabId::from_stored(stored);
            }
            Ok(_) => {}
            Err(e) => {
                let tab_id = TabId::generate();
                warn!(
                    error = %e,
                    tab_id = %tab_id,
                    "Tab storage unavailable, using an unpersisted tab id"
                );
                return tab_id;
            }
        }

        let tab_id = TabId::generate();
        match store.set_item(TAB_ID_STORAGE_KEY, tab_id.as_str()) {
            Ok(()) => debug!(tab_id = %tab_id, "Generated tab id"),
            Err(e) => warn!(
                error = %e,
                tab_id = %tab_id,
                "Failed to persist tab id, it will not survive a reload"
            ),
        }
        tab_id
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::browser::storage::MemoryTabStore;
    use crate::error::{Error, Result};

    struct UnavailableStore;

    impl TabScopedStore for UnavailableStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::storage("storage disabled"))
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::storage("storage disabled"))
        }
    }

    struct ReadOnlyStore;

    impl TabScopedStore for ReadOnlyStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::storage("quota exceeded"))
        }
    }

    #[test]
    fn test_resolve_is_stable_for_one_store() {
        let store = MemoryTabStore::new();
        let first = TabIdentity::resolve(&store);

        for _ in 0..50 {
            assert_eq!(TabIdentity::resolve(&store), first);
        }
        assert!(first.is_well_formed());
    }

    #[test]
    fn test_resolve_persists_under_tab_id_key() {
        let store = MemoryTabStore::new();
        let id = TabIdentity::resolve(&store);
        assert_eq!(
            store.get_item("tabId").unwrap().as_deref(),
            Some(id.as_str())
        );
    }

    #[test]
    fn test_resolve_reuses_stored_value_verbatim() {
        let store = MemoryTabStore::new();
        store.set_item("tabId", "tab-reload1").unwrap();
        assert_eq!(TabIdentity::resolve(&store).as_str(), "tab-reload1");
    }

    #[test]
    fn test_separate_stores_get_separate_ids() {
        let mut collisions = 0;
        for _ in 0..200 {
            let a = TabIdentity::resolve(&MemoryTabStore::new());
            let b = TabIdentity::resolve(&MemoryTabStore::new());
            if a == b {
                collisions += 1;
            }
        }
        assert_eq!(collisions, 0);
    }

    #[test]
    fn test_unavailable_store_degrades_to_fresh_ids() {
        let a = TabIdentity::resolve(&UnavailableStore);
        let b = TabIdentity::resolve(&UnavailableStore);
        assert!(a.is_well_formed());
        assert!(b.is_well_formed());
        assert_ne!(a, b);
    }

    #[test]
    fn test_unwritable_store_still_yields_an_id() {
        assert!(TabIdentity::resolve(&ReadOnlyStore).is_well_formed());
    }

    #[test]
    fn test_constructed_identity_is_fixed_even_without_storage() {
        let identity = TabIdentity::new(&UnavailableStore);
        let id = identity.tab_id().clone();
        assert_eq!(identity.tab_id(), &id);
        assert_eq!(identity.clone().tab_id(), &id);
    }
}
