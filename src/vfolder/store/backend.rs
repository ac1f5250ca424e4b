use super::Catalog;
use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while CatalogStore handles the "what" (lookups, association bookkeeping).
pub trait StorageBackend {
    /// Load the whole catalog. A missing catalog is an empty one.
    fn load_catalog(&self) -> Result<Catalog>;

    /// Persist the whole catalog.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_catalog(&self, catalog: &Catalog) -> Result<()>;

    /// Where the catalog lives. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
