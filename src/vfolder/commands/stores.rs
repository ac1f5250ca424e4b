use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VfolderError};
use crate::events::{self, VfolderEvent};
use crate::model::Store;
use crate::store::{DataStore, StoreFilter};
use crate::tree;
use std::collections::BTreeSet;

use super::folders::get_by_name;

/// Registers stores and lets each one join the folders it matches.
///
/// Every path is checked before anything is saved: one bad or duplicate path
/// rejects the whole batch.
pub fn add<S: DataStore, P: AsRef<str>>(db: &mut S, paths: &[P]) -> Result<CmdResult> {
    let mut seen = BTreeSet::new();
    let mut pending = Vec::with_capacity(paths.len());
    for path in paths {
        let store = Store::new(path.as_ref())?;
        let repeated = !seen.insert(store.pootle_path.clone());
        if repeated || db.find_store(&store.pootle_path)?.is_some() {
            return Err(VfolderError::DuplicateStore(store.pootle_path));
        }
        pending.push(store);
    }

    let mut result = CmdResult::default();
    for store in pending {
        db.save_store(&store)?;
        result.add_message(CmdMessage::success(format!("Added {}", store.pootle_path)));

        let joined = events::dispatch(db, VfolderEvent::StoreCreated(store.id))?;
        if joined.affected_stores.is_empty() {
            result.affected_stores.push(store);
        }
        result.merge(joined);
    }
    Ok(result)
}

/// Lists stores, optionally only those associated with one folder.
pub fn list<S: DataStore>(db: &S, folder: Option<&str>) -> Result<CmdResult> {
    let mut stores = db.list_stores(&StoreFilter::all())?;
    if let Some(name) = folder {
        let folder = get_by_name(db, name)?;
        let ids = db.folder_store_ids(&folder.id)?;
        stores.retain(|s| ids.contains(&s.id));
    }

    let mut result = CmdResult::default();
    if stores.is_empty() {
        result.add_message(CmdMessage::info("No stores found."));
    }
    Ok(result.with_listed_stores(stores))
}

/// Removes a store; folders that held it get their tree statistics refreshed.
pub fn remove<S: DataStore>(db: &mut S, path: &str) -> Result<CmdResult> {
    let store = db
        .find_store(path)?
        .ok_or_else(|| VfolderError::StoreNotFound(path.to_string()))?;
    let held_by = db.delete_store(&store.id)?;

    for folder_id in &held_by {
        match db.get_folder(folder_id) {
            Ok(folder) => tree::refresh_folder(db, &folder)?,
            Err(VfolderError::FolderNotFound(_)) => continue,
            Err(e) => return Err(e),
        }
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Removed {} (was in {} folder(s))",
        store.pootle_path,
        held_by.len()
    )));
    result.affected_stores.push(store);
    Ok(result)
}
