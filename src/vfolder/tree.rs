//! Virtual-folder tree cache.
//!
//! Each folder exposes the real directories holding its stores as tree items
//! (`/en/proj/sub/` seen through folder `docs` is `/en/proj/docs/sub/`). Items
//! carry an aggregate store count that is recomputed from the item up to the
//! translation project root whenever membership below it changes.

use crate::error::Result;
use crate::model::{Store, TreeItem, VirtualFolder};
use crate::path::{ancestor_dirs, vfolder_path};
use crate::store::{DataStore, StoreFilter};
use chrono::Utc;

/// Ensures the tree item for the store's directory exists, then refreshes the
/// statistics from there up to the root. Returns true when the item was created.
pub fn update_vfolder_tree<S: DataStore>(
    db: &mut S,
    folder: &VirtualFolder,
    store: &Store,
) -> Result<bool> {
    let created = ensure_tree_item(db, folder, store)?;
    refresh_stats(db, folder, &store.path()?.parent())?;
    Ok(created)
}

/// Creates the (empty) tree item for the store's directory if it is missing.
/// Counts are left to [`refresh_stats`] or [`refresh_folder`].
pub fn ensure_tree_item<S: DataStore>(
    db: &mut S,
    folder: &VirtualFolder,
    store: &Store,
) -> Result<bool> {
    let directory = store.path()?.parent();
    if db.get_tree_item(&folder.id, &directory)?.is_some() {
        return Ok(false);
    }

    let item = TreeItem {
        vfolder_id: folder.id,
        pootle_path: vfolder_path(&directory, &folder.name)?,
        directory,
        store_count: 0,
        refreshed_at: Utc::now(),
    };
    db.save_tree_item(&item)?;
    tracing::debug!(target: "vfolder::tree", folder = %folder.name, path = %item.pootle_path, "created tree item");
    Ok(true)
}

/// Recomputes the store count of the item at `directory` (if any) and of every
/// existing ancestor item of the same folder.
pub fn refresh_stats<S: DataStore>(
    db: &mut S,
    folder: &VirtualFolder,
    directory: &str,
) -> Result<()> {
    let members = member_paths(db, folder)?;
    let now = Utc::now();

    let dirs = std::iter::once(directory.to_string()).chain(ancestor_dirs(directory));
    for dir in dirs {
        if let Some(mut item) = db.get_tree_item(&folder.id, &dir)? {
            item.store_count = members.iter().filter(|p| p.starts_with(&dir)).count();
            item.refreshed_at = now;
            db.save_tree_item(&item)?;
        }
    }
    Ok(())
}

/// Recomputes every tree item of a folder.
pub fn refresh_folder<S: DataStore>(db: &mut S, folder: &VirtualFolder) -> Result<()> {
    let members = member_paths(db, folder)?;
    let now = Utc::now();

    for mut item in db.list_tree_items(&folder.id)? {
        item.store_count = members
            .iter()
            .filter(|p| p.starts_with(&item.directory))
            .count();
        item.refreshed_at = now;
        db.save_tree_item(&item)?;
    }
    Ok(())
}

fn member_paths<S: DataStore>(db: &S, folder: &VirtualFolder) -> Result<Vec<String>> {
    let ids = db.folder_store_ids(&folder.id)?;
    Ok(db
        .list_stores(&StoreFilter::all())?
        .into_iter()
        .filter(|s| ids.contains(&s.id))
        .map(|s| s.pootle_path)
        .collect())
}
