use super::backend::StorageBackend;
use super::Catalog;
use crate::error::{Result, VfolderError};
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the engine is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    catalog: RefCell<Catalog>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl StorageBackend for MemBackend {
    fn load_catalog(&self) -> Result<Catalog> {
        Ok(self.catalog.borrow().clone())
    }

    fn save_catalog(&self, catalog: &Catalog) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(VfolderError::Store("Simulated write error".to_string()));
        }
        *self.catalog.borrow_mut() = catalog.clone();
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("/memory/data.json")
    }
}
