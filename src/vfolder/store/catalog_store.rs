use super::backend::StorageBackend;
use super::{Catalog, DataStore, DoctorReport, StoreFilter};
use crate::error::{Result, VfolderError};
use crate::model::{Store, TreeItem, VirtualFolder};
use crate::path::PootlePath;
use std::collections::BTreeSet;
use std::path::PathBuf;
use uuid::Uuid;

pub struct CatalogStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> CatalogStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    /// Load, mutate, save.
    fn update<T>(&mut self, f: impl FnOnce(&mut Catalog) -> Result<T>) -> Result<T> {
        let mut catalog = self.backend.load_catalog()?;
        let out = f(&mut catalog)?;
        self.backend.save_catalog(&catalog)?;
        Ok(out)
    }
}

impl<B: StorageBackend> DataStore for CatalogStore<B> {
    fn save_store(&mut self, store: &Store) -> Result<()> {
        self.update(|catalog| {
            catalog.stores.insert(store.id, store.clone());
            Ok(())
        })
    }

    fn get_store(&self, id: &Uuid) -> Result<Store> {
        let catalog = self.backend.load_catalog()?;
        catalog
            .stores
            .get(id)
            .cloned()
            .ok_or_else(|| VfolderError::store_id(id))
    }

    fn find_store(&self, pootle_path: &str) -> Result<Option<Store>> {
        let catalog = self.backend.load_catalog()?;
        Ok(catalog
            .stores
            .values()
            .find(|s| s.pootle_path == pootle_path)
            .cloned())
    }

    fn list_stores(&self, filter: &StoreFilter) -> Result<Vec<Store>> {
        let catalog = self.backend.load_catalog()?;
        let mut stores: Vec<Store> = catalog
            .stores
            .into_values()
            .filter(|store| match PootlePath::parse(&store.pootle_path) {
                Ok(path) => filter.admits(&path.language, &path.project),
                Err(_) => {
                    tracing::debug!(target: "vfolder::store", path = %store.pootle_path, "skipping store with unparseable path");
                    false
                }
            })
            .collect();
        stores.sort_by(|a, b| a.pootle_path.cmp(&b.pootle_path));
        Ok(stores)
    }

    fn delete_store(&mut self, id: &Uuid) -> Result<BTreeSet<Uuid>> {
        self.update(|catalog| {
            if catalog.stores.remove(id).is_none() {
                return Err(VfolderError::store_id(id));
            }
            Ok(catalog.associations.drop_store(id))
        })
    }

    fn save_folder(&mut self, folder: &VirtualFolder) -> Result<()> {
        self.update(|catalog| {
            catalog.folders.insert(folder.id, folder.clone());
            Ok(())
        })
    }

    fn get_folder(&self, id: &Uuid) -> Result<VirtualFolder> {
        let catalog = self.backend.load_catalog()?;
        catalog
            .folders
            .get(id)
            .cloned()
            .ok_or_else(|| VfolderError::folder_id(id))
    }

    fn find_folder(&self, name: &str) -> Result<Option<VirtualFolder>> {
        let catalog = self.backend.load_catalog()?;
        Ok(catalog.folders.values().find(|f| f.name == name).cloned())
    }

    fn list_folders(&self) -> Result<Vec<VirtualFolder>> {
        let catalog = self.backend.load_catalog()?;
        let mut folders: Vec<VirtualFolder> = catalog.folders.into_values().collect();
        folders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(folders)
    }

    fn delete_folder(&mut self, id: &Uuid) -> Result<BTreeSet<Uuid>> {
        self.update(|catalog| {
            if catalog.folders.remove(id).is_none() {
                return Err(VfolderError::folder_id(id));
            }
            catalog.tree.remove(id);
            Ok(catalog.associations.drop_folder(id))
        })
    }

    fn folder_store_ids(&self, folder_id: &Uuid) -> Result<BTreeSet<Uuid>> {
        let catalog = self.backend.load_catalog()?;
        Ok(catalog.associations.stores_of(folder_id))
    }

    fn store_folder_ids(&self, store_id: &Uuid) -> Result<BTreeSet<Uuid>> {
        let catalog = self.backend.load_catalog()?;
        Ok(catalog.associations.folders_of(store_id))
    }

    fn is_associated(&self, folder_id: &Uuid, store_id: &Uuid) -> Result<bool> {
        let catalog = self.backend.load_catalog()?;
        Ok(catalog.associations.contains(folder_id, store_id))
    }

    fn add_associations(&mut self, folder_id: &Uuid, store_ids: &[Uuid]) -> Result<()> {
        if store_ids.is_empty() {
            return Ok(());
        }
        self.update(|catalog| {
            catalog.associations.add(*folder_id, store_ids);
            Ok(())
        })
    }

    fn remove_associations(&mut self, folder_id: &Uuid, store_ids: &[Uuid]) -> Result<()> {
        if store_ids.is_empty() {
            return Ok(());
        }
        self.update(|catalog| {
            catalog.associations.remove(folder_id, store_ids);
            Ok(())
        })
    }

    fn get_tree_item(&self, folder_id: &Uuid, directory: &str) -> Result<Option<TreeItem>> {
        let catalog = self.backend.load_catalog()?;
        Ok(catalog
            .tree
            .get(folder_id)
            .and_then(|items| items.get(directory))
            .cloned())
    }

    fn save_tree_item(&mut self, item: &TreeItem) -> Result<()> {
        self.update(|catalog| {
            catalog
                .tree
                .entry(item.vfolder_id)
                .or_default()
                .insert(item.directory.clone(), item.clone());
            Ok(())
        })
    }

    fn list_tree_items(&self, folder_id: &Uuid) -> Result<Vec<TreeItem>> {
        let catalog = self.backend.load_catalog()?;
        Ok(catalog
            .tree
            .get(folder_id)
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default())
    }

    fn doctor(&mut self) -> Result<DoctorReport> {
        self.update(|catalog| {
            let mut report = DoctorReport::default();

            let pairs: Vec<(Uuid, Vec<Uuid>)> = catalog
                .associations
                .iter()
                .map(|(folder_id, stores)| (*folder_id, stores.iter().copied().collect()))
                .collect();
            for (folder_id, store_ids) in pairs {
                let dangling: Vec<Uuid> = if catalog.folders.contains_key(&folder_id) {
                    store_ids
                        .into_iter()
                        .filter(|id| !catalog.stores.contains_key(id))
                        .collect()
                } else {
                    store_ids
                };
                report.dangling_associations += dangling.len();
                catalog.associations.remove(&folder_id, &dangling);
            }

            let before: usize = catalog.tree.values().map(|items| items.len()).sum();
            let folders = &catalog.folders;
            catalog.tree.retain(|folder_id, _| folders.contains_key(folder_id));
            let after: usize = catalog.tree.values().map(|items| items.len()).sum();
            report.orphan_tree_items = before - after;

            Ok(report)
        })
    }
}
