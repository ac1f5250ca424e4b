use super::catalog_store::CatalogStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = CatalogStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        CatalogStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{FolderScope, Store, VirtualFolder};
    use crate::store::DataStore;

    /// Seeds an in-memory store without going through the engine, so no
    /// associations exist until a test reconciles.
    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_stores(mut self, paths: &[&str]) -> Self {
            for path in paths {
                let store = Store::new(path).unwrap();
                self.store.save_store(&store).unwrap();
            }
            self
        }

        pub fn with_folder(mut self, name: &str, scope: FolderScope, rules: &str) -> Self {
            let folder = VirtualFolder::new(name, scope, rules);
            self.store.save_folder(&folder).unwrap();
            self
        }

        pub fn with_global_folder(self, name: &str, rules: &str) -> Self {
            self.with_folder(name, FolderScope::global(), rules)
        }

        pub fn with_prioritized_folder(mut self, name: &str, rules: &str, priority: f64) -> Self {
            let folder =
                VirtualFolder::new(name, FolderScope::global(), rules).with_priority(priority);
            self.store.save_folder(&folder).unwrap();
            self
        }

        pub fn folder(&self, name: &str) -> VirtualFolder {
            self.store.find_folder(name).unwrap().unwrap()
        }

        pub fn store_at(&self, path: &str) -> Store {
            self.store.find_store(path).unwrap().unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;
    use crate::error::VfolderError;
    use crate::store::{DataStore, DoctorReport, StoreFilter};
    use std::collections::BTreeSet;
    use uuid::Uuid;

    #[test]
    fn test_delete_not_found() {
        let mut store = InMemoryStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.delete_store(&id),
            Err(VfolderError::StoreNotFound(_))
        ));
        assert!(matches!(
            store.delete_folder(&id),
            Err(VfolderError::FolderNotFound(_))
        ));
    }

    #[test]
    fn list_stores_applies_filter_and_orders_by_path() {
        let fixture = StoreFixture::new().with_stores(&["/fr/p1/b.po", "/en/p1/a.po", "/en/p2/a.po"]);

        let all = fixture.store.list_stores(&StoreFilter::all()).unwrap();
        let paths: Vec<&str> = all.iter().map(|s| s.pootle_path.as_str()).collect();
        assert_eq!(paths, vec!["/en/p1/a.po", "/en/p2/a.po", "/fr/p1/b.po"]);

        let filter = StoreFilter {
            languages: Some(BTreeSet::from(["en".to_string()])),
            projects: Some(BTreeSet::from(["p1".to_string()])),
        };
        let filtered = fixture.store.list_stores(&filter).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].pootle_path, "/en/p1/a.po");
    }

    #[test]
    fn deleting_a_store_drops_its_associations() {
        let mut fixture = StoreFixture::new()
            .with_stores(&["/en/p1/a.po"])
            .with_global_folder("all", "*");
        let folder = fixture.folder("all");
        let store = fixture.store_at("/en/p1/a.po");
        fixture.store.add_associations(&folder.id, &[store.id]).unwrap();

        let held_by = fixture.store.delete_store(&store.id).unwrap();
        assert_eq!(held_by, BTreeSet::from([folder.id]));
        assert!(fixture.store.folder_store_ids(&folder.id).unwrap().is_empty());
    }

    #[test]
    fn doctor_removes_dangling_associations() {
        let mut fixture = StoreFixture::new()
            .with_stores(&["/en/p1/a.po"])
            .with_global_folder("all", "*");
        let folder = fixture.folder("all");
        let store = fixture.store_at("/en/p1/a.po");
        let ghost = Uuid::new_v4();
        fixture
            .store
            .add_associations(&folder.id, &[store.id, ghost])
            .unwrap();
        fixture.store.add_associations(&Uuid::new_v4(), &[store.id]).unwrap();

        let report = fixture.store.doctor().unwrap();
        assert_eq!(
            report,
            DoctorReport {
                dangling_associations: 2,
                orphan_tree_items: 0
            }
        );
        assert_eq!(
            fixture.store.store_folder_ids(&store.id).unwrap(),
            BTreeSet::from([folder.id])
        );
    }

    #[test]
    fn simulated_write_error_propagates() {
        let mut store = InMemoryStore::new();
        store.backend.set_simulate_write_error(true);
        let s = crate::model::Store::new("/en/p1/a.po").unwrap();
        assert!(matches!(store.save_store(&s), Err(VfolderError::Store(_))));
    }
}
