//! # Storage Layer
//!
//! This module defines the persistence seam for the engine. The [`DataStore`]
//! trait covers the three collections the engine reads and writes:
//!
//! - **Stores**: translatable resources, looked up by id, path or scope filter
//! - **Virtual folders**: rule definitions, looked up by id or name
//! - **Associations**: the folder-id -> store-id lookup table, plus the derived
//!   virtual-folder tree items
//!
//! ## Implementations
//!
//! All operations are implemented once in [`catalog_store::CatalogStore`],
//! which loads and saves a whole [`Catalog`] through a [`backend::StorageBackend`]:
//!
//! - [`fs::FileStore`]: production storage, `data.json` in the data directory
//! - [`memory::InMemoryStore`]: in-memory storage for tests
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── data.json      # stores, folders, associations, tree items
//! └── config.json    # VfolderConfig
//! ```
//!
//! The store holds no invariant between folders and stores on its own; the
//! association table only changes when the reconciler or finder writes to it.

use crate::error::Result;
use crate::model::{Store, TreeItem, VirtualFolder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

pub mod backend;
pub mod catalog_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

/// Restricts a store lookup. `None` means unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreFilter {
    pub languages: Option<BTreeSet<String>>,
    pub projects: Option<BTreeSet<String>>,
}

impl StoreFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn admits(&self, language: &str, project: &str) -> bool {
        let lang_ok = self
            .languages
            .as_ref()
            .map_or(true, |set| set.contains(language));
        let proj_ok = self
            .projects
            .as_ref()
            .map_or(true, |set| set.contains(project));
        lang_ok && proj_ok
    }
}

/// Folder-id -> store-id lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssociationIndex(BTreeMap<Uuid, BTreeSet<Uuid>>);

impl AssociationIndex {
    pub fn stores_of(&self, folder_id: &Uuid) -> BTreeSet<Uuid> {
        self.0.get(folder_id).cloned().unwrap_or_default()
    }

    pub fn folders_of(&self, store_id: &Uuid) -> BTreeSet<Uuid> {
        self.0
            .iter()
            .filter(|(_, stores)| stores.contains(store_id))
            .map(|(folder_id, _)| *folder_id)
            .collect()
    }

    pub fn contains(&self, folder_id: &Uuid, store_id: &Uuid) -> bool {
        self.0
            .get(folder_id)
            .is_some_and(|stores| stores.contains(store_id))
    }

    pub fn add(&mut self, folder_id: Uuid, store_ids: &[Uuid]) {
        self.0
            .entry(folder_id)
            .or_default()
            .extend(store_ids.iter().copied());
    }

    pub fn remove(&mut self, folder_id: &Uuid, store_ids: &[Uuid]) {
        if let Some(stores) = self.0.get_mut(folder_id) {
            for id in store_ids {
                stores.remove(id);
            }
            if stores.is_empty() {
                self.0.remove(folder_id);
            }
        }
    }

    pub fn drop_folder(&mut self, folder_id: &Uuid) -> BTreeSet<Uuid> {
        self.0.remove(folder_id).unwrap_or_default()
    }

    pub fn drop_store(&mut self, store_id: &Uuid) -> BTreeSet<Uuid> {
        let mut affected = BTreeSet::new();
        self.0.retain(|folder_id, stores| {
            if stores.remove(store_id) {
                affected.insert(*folder_id);
            }
            !stores.is_empty()
        });
        affected
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &BTreeSet<Uuid>)> {
        self.0.iter()
    }
}

/// Everything the engine persists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub stores: BTreeMap<Uuid, Store>,
    #[serde(default)]
    pub folders: BTreeMap<Uuid, VirtualFolder>,
    #[serde(default)]
    pub associations: AssociationIndex,
    // folder id -> real directory -> tree item
    #[serde(default)]
    pub tree: BTreeMap<Uuid, BTreeMap<String, TreeItem>>,
}

/// Report from the `doctor` operation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DoctorReport {
    pub dangling_associations: usize,
    pub orphan_tree_items: usize,
}

/// Abstract interface for stores, folders and their associations.
pub trait DataStore {
    /// Save a store (create or update)
    fn save_store(&mut self, store: &Store) -> Result<()>;

    fn get_store(&self, id: &Uuid) -> Result<Store>;

    /// Look up a store by its pootle path
    fn find_store(&self, pootle_path: &str) -> Result<Option<Store>>;

    /// Stores admitted by the filter, ordered by pootle path
    fn list_stores(&self, filter: &StoreFilter) -> Result<Vec<Store>>;

    /// Delete a store and its associations.
    /// Returns the ids of the folders that held it.
    fn delete_store(&mut self, id: &Uuid) -> Result<BTreeSet<Uuid>>;

    /// Save a folder (create or update)
    fn save_folder(&mut self, folder: &VirtualFolder) -> Result<()>;

    fn get_folder(&self, id: &Uuid) -> Result<VirtualFolder>;

    fn find_folder(&self, name: &str) -> Result<Option<VirtualFolder>>;

    /// All folders, ordered by name
    fn list_folders(&self) -> Result<Vec<VirtualFolder>>;

    /// Delete a folder with its associations and tree items.
    /// Returns the ids of the stores it held.
    fn delete_folder(&mut self, id: &Uuid) -> Result<BTreeSet<Uuid>>;

    fn folder_store_ids(&self, folder_id: &Uuid) -> Result<BTreeSet<Uuid>>;

    fn store_folder_ids(&self, store_id: &Uuid) -> Result<BTreeSet<Uuid>>;

    fn is_associated(&self, folder_id: &Uuid, store_id: &Uuid) -> Result<bool>;

    fn add_associations(&mut self, folder_id: &Uuid, store_ids: &[Uuid]) -> Result<()>;

    fn remove_associations(&mut self, folder_id: &Uuid, store_ids: &[Uuid]) -> Result<()>;

    fn get_tree_item(&self, folder_id: &Uuid, directory: &str) -> Result<Option<TreeItem>>;

    fn save_tree_item(&mut self, item: &TreeItem) -> Result<()>;

    /// Tree items of a folder, ordered by directory
    fn list_tree_items(&self, folder_id: &Uuid) -> Result<Vec<TreeItem>>;

    /// Drop associations and tree items pointing at missing records
    fn doctor(&mut self) -> Result<DoctorReport>;
}
