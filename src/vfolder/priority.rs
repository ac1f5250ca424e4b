use crate::error::{Result, VfolderError};
use crate::model::DEFAULT_PRIORITY;
use crate::store::DataStore;
use uuid::Uuid;

/// Highest priority among the folders holding the store, or the default when
/// it belongs to none. Folders that no longer exist are ignored.
pub fn effective_priority<S: DataStore>(db: &S, store_id: &Uuid) -> Result<f64> {
    let mut best: Option<f64> = None;
    for folder_id in db.store_folder_ids(store_id)? {
        match db.get_folder(&folder_id) {
            Ok(folder) => {
                best = Some(best.map_or(folder.priority, |b| b.max(folder.priority)));
            }
            Err(VfolderError::FolderNotFound(_)) => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(best.unwrap_or(DEFAULT_PRIORITY))
}

/// Recomputes and persists a store's priority. Returns the new value.
pub fn set_priority<S: DataStore>(db: &mut S, store_id: &Uuid) -> Result<f64> {
    let mut store = db.get_store(store_id)?;
    let priority = effective_priority(db, store_id)?;
    if store.priority != priority {
        tracing::debug!(target: "vfolder::priority", path = %store.pootle_path, from = store.priority, to = priority, "store priority changed");
        store.priority = priority;
        db.save_store(&store)?;
    }
    Ok(priority)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn highest_folder_priority_wins() {
        let mut fixture = StoreFixture::new()
            .with_stores(&["/en/p/a.po"])
            .with_prioritized_folder("low", "*", 0.5)
            .with_prioritized_folder("high", "*", 3.0);
        let store = fixture.store_at("/en/p/a.po");
        let (low, high) = (fixture.folder("low"), fixture.folder("high"));

        fixture.store.add_associations(&low.id, &[store.id]).unwrap();
        assert_eq!(set_priority(&mut fixture.store, &store.id).unwrap(), 0.5);

        fixture.store.add_associations(&high.id, &[store.id]).unwrap();
        assert_eq!(set_priority(&mut fixture.store, &store.id).unwrap(), 3.0);
        assert_eq!(fixture.store_at("/en/p/a.po").priority, 3.0);
    }

    #[test]
    fn falls_back_to_default_without_folders() {
        let mut fixture = StoreFixture::new()
            .with_stores(&["/en/p/a.po"])
            .with_prioritized_folder("high", "*", 5.0);
        let store = fixture.store_at("/en/p/a.po");
        let high = fixture.folder("high");

        fixture.store.add_associations(&high.id, &[store.id]).unwrap();
        set_priority(&mut fixture.store, &store.id).unwrap();
        fixture.store.remove_associations(&high.id, &[store.id]).unwrap();

        assert_eq!(
            set_priority(&mut fixture.store, &store.id).unwrap(),
            DEFAULT_PRIORITY
        );
    }
}
