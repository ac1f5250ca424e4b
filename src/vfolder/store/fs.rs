use super::catalog_store::CatalogStore;
use super::fs_backend::FsBackend;
use std::path::PathBuf;

pub type FileStore = CatalogStore<FsBackend>;

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        CatalogStore::with_backend(FsBackend::new(root))
    }
}
