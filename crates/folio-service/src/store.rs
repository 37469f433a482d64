//! # Catalog Store
//!
//! Immutable catalog snapshots behind an atomically swapped reference.
//!
//! ## Refresh Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Catalog Snapshot Lifecycle                            │
//! │                                                                         │
//! │  Admin reload ──► load + integrity check ──► publish(new snapshot)      │
//! │                                                    │                    │
//! │                                  swap reference ◄──┘                    │
//! │                                                                         │
//! │  Request A (started before swap) ──► keeps OLD Arc ──► consistent       │
//! │  Request B (started after swap)  ──► gets NEW Arc  ──► consistent       │
//! │                                                                         │
//! │  A snapshot handed to a caller is NEVER edited in place - a refresh     │
//! │  always publishes a fresh value and swaps the reference.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why RwLock?
//! The map is read on every request and written only on administrative
//! reloads; readers must never block each other. The lock protects only
//! the reference swap - the catalogs themselves are immutable `Arc`s.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::info;

use folio_core::catalog::ProductCatalog;

/// Thread-safe registry of the current catalog snapshot per product.
#[derive(Debug, Default)]
pub struct CatalogStore {
    catalogs: RwLock<HashMap<String, Arc<ProductCatalog>>>,
}

impl CatalogStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        CatalogStore {
            catalogs: RwLock::new(HashMap::new()),
        }
    }

    /// Publishes a catalog snapshot, replacing any previous snapshot for
    /// the same product. Callers already holding the previous `Arc` keep
    /// a consistent view until they finish.
    pub fn publish(&self, catalog: ProductCatalog) -> Arc<ProductCatalog> {
        let snapshot = Arc::new(catalog);
        let mut catalogs = self.catalogs.write().expect("catalog store lock poisoned");
        let replaced = catalogs
            .insert(snapshot.product_id.clone(), Arc::clone(&snapshot))
            .is_some();
        info!(
            product_id = %snapshot.product_id,
            replaced,
            "catalog snapshot published"
        );
        snapshot
    }

    /// Returns the current snapshot for a product, if one is published.
    pub fn snapshot(&self, product_id: &str) -> Option<Arc<ProductCatalog>> {
        let catalogs = self.catalogs.read().expect("catalog store lock poisoned");
        catalogs.get(product_id).cloned()
    }

    /// Retires a product line. Existing snapshot holders are unaffected.
    pub fn retire(&self, product_id: &str) -> bool {
        let mut catalogs = self.catalogs.write().expect("catalog store lock poisoned");
        let removed = catalogs.remove(product_id).is_some();
        if removed {
            info!(product_id = %product_id, "catalog snapshot retired");
        }
        removed
    }

    /// Product ids with a published snapshot, sorted for stable listings.
    pub fn product_ids(&self) -> Vec<String> {
        let catalogs = self.catalogs.read().expect("catalog store lock poisoned");
        let mut ids: Vec<String> = catalogs.keys().cloned().collect();
        ids.sort();
        ids
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_catalog_str;
    use crate::testdoc::FIXTURE_CATALOG_JSON;

    #[test]
    fn test_publish_and_snapshot() {
        let store = CatalogStore::new();
        assert!(store.snapshot("a5-book").is_none());

        store.publish(load_catalog_str(FIXTURE_CATALOG_JSON).unwrap());
        let snapshot = store.snapshot("a5-book").unwrap();
        assert_eq!(snapshot.book_size, "A5");
        assert_eq!(store.product_ids(), vec!["a5-book"]);
    }

    #[test]
    fn test_republish_swaps_without_touching_old_snapshot() {
        let store = CatalogStore::new();
        store.publish(load_catalog_str(FIXTURE_CATALOG_JSON).unwrap());

        // A request in flight holds the old snapshot
        let held = store.snapshot("a5-book").unwrap();
        let old_minimum = held.quantity.minimum;

        // Admin publishes a revised catalog
        let mut revised = load_catalog_str(FIXTURE_CATALOG_JSON).unwrap();
        revised.quantity.minimum = 200;
        revised.discount_tiers[0].min_quantity = 200;
        store.publish(revised);

        // The held snapshot is untouched; new readers see the revision
        assert_eq!(held.quantity.minimum, old_minimum);
        assert_eq!(store.snapshot("a5-book").unwrap().quantity.minimum, 200);
    }

    #[test]
    fn test_retire_removes_only_the_reference() {
        let store = CatalogStore::new();
        store.publish(load_catalog_str(FIXTURE_CATALOG_JSON).unwrap());
        let held = store.snapshot("a5-book").unwrap();

        assert!(store.retire("a5-book"));
        assert!(!store.retire("a5-book"));
        assert!(store.snapshot("a5-book").is_none());

        // The retired catalog lives on for whoever still holds it
        assert_eq!(held.product_id, "a5-book");
    }
}
