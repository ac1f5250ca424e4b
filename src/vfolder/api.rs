//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every operation, whatever the client is.
//!
//! It dispatches to `commands/*.rs`, resolves folder names and returns
//! structured [`CmdResult`]s. It performs no I/O of its own and holds no
//! business logic.
//!
//! `VfolderApi<S: DataStore>` is generic over the storage backend:
//! `VfolderApi<FileStore>` in the binary, `VfolderApi<InMemoryStore>` in tests.

use crate::commands;
use crate::error::Result;
use crate::store::DataStore;

/// The main API facade for vfolder operations.
pub struct VfolderApi<S: DataStore> {
    store: S,
    paths: commands::VfolderPaths,
}

impl<S: DataStore> VfolderApi<S> {
    pub fn new(store: S, paths: commands::VfolderPaths) -> Self {
        Self { store, paths }
    }

    pub fn create_folder(&mut self, folder: NewFolder) -> Result<CmdResult> {
        commands::folders::create(&mut self.store, folder)
    }

    pub fn edit_folder(&mut self, name: &str, edit: FolderEdit) -> Result<CmdResult> {
        commands::folders::edit(&mut self.store, name, edit)
    }

    pub fn delete_folder(&mut self, name: &str) -> Result<CmdResult> {
        commands::folders::delete(&mut self.store, name)
    }

    pub fn list_folders(&self) -> Result<CmdResult> {
        commands::folders::list(&self.store)
    }

    pub fn show_folder(&self, name: &str) -> Result<CmdResult> {
        commands::folders::show(&self.store, name)
    }

    pub fn add_stores<P: AsRef<str>>(&mut self, paths: &[P]) -> Result<CmdResult> {
        commands::stores::add(&mut self.store, paths)
    }

    pub fn list_stores(&self, folder: Option<&str>) -> Result<CmdResult> {
        commands::stores::list(&self.store, folder)
    }

    pub fn remove_store(&mut self, path: &str) -> Result<CmdResult> {
        commands::stores::remove(&mut self.store, path)
    }

    /// Reconciles one folder, or all of them.
    pub fn sync(&mut self, folder: Option<&str>) -> Result<CmdResult> {
        commands::sync::run(&mut self.store, folder)
    }

    pub fn matching_stores(&self, folder: &str) -> Result<CmdResult> {
        commands::matching::run(&self.store, folder)
    }

    pub fn find_folders(&self, pootle_path: &str) -> Result<CmdResult> {
        commands::find::preview(&self.store, pootle_path)
    }

    pub fn tree(&self, folder: &str) -> Result<CmdResult> {
        commands::tree::run(&self.store, folder)
    }

    pub fn doctor(&mut self) -> Result<CmdResult> {
        commands::doctor::run(&mut self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn init(&self) -> Result<CmdResult> {
        commands::init::run(&self.paths)
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::folders::{FolderEdit, NewFolder};
pub use commands::{CmdMessage, CmdResult, MessageLevel, Reconciliation, VfolderPaths};
