//! Reconciliation: recompute a folder's membership and apply the delta.

use crate::commands::{CmdMessage, CmdResult, Reconciliation};
use crate::error::{Result, VfolderError};
use crate::matcher::PathMatcher;
use crate::model::VirtualFolder;
use crate::store::DataStore;
use crate::{priority, tree};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Diffs current associations against the matching set and persists the
/// difference. Returns `(to_add, to_remove)`.
///
/// Associations pointing at stores that no longer exist never match, so they
/// end up in `to_remove`.
pub fn reconcile<S: DataStore>(
    db: &mut S,
    folder: &VirtualFolder,
) -> Result<(BTreeSet<Uuid>, BTreeSet<Uuid>)> {
    let matcher = PathMatcher::new(folder)?;
    let existing = db.folder_store_ids(&folder.id)?;
    let candidates = db.list_stores(&matcher.store_filter())?;
    let matching = matcher.matching_ids(&candidates);

    let to_add: BTreeSet<Uuid> = matching.difference(&existing).copied().collect();
    let to_remove: BTreeSet<Uuid> = existing.difference(&matching).copied().collect();

    db.add_associations(&folder.id, &to_add.iter().copied().collect::<Vec<_>>())?;
    db.remove_associations(&folder.id, &to_remove.iter().copied().collect::<Vec<_>>())?;

    tracing::debug!(
        target: "vfolder::sync",
        folder = %folder.name,
        candidates = candidates.len(),
        matching = matching.len(),
        added = to_add.len(),
        removed = to_remove.len(),
        "reconciled"
    );
    Ok((to_add, to_remove))
}

/// Reconciles a folder, then updates the tree cache and store priorities for
/// every store whose membership changed.
pub fn update_stores<S: DataStore>(db: &mut S, folder: &VirtualFolder) -> Result<Reconciliation> {
    let (added, removed) = reconcile(db, folder)?;

    for id in &added {
        let store = db.get_store(id)?;
        tree::ensure_tree_item(db, folder, &store)?;
        if store.priority != folder.priority {
            priority::set_priority(db, id)?;
        }
    }

    for id in &removed {
        let store = match db.get_store(id) {
            Ok(store) => store,
            Err(VfolderError::StoreNotFound(_)) => continue,
            Err(e) => return Err(e),
        };
        if store.priority == folder.priority {
            priority::set_priority(db, id)?;
        }
    }

    if !added.is_empty() || !removed.is_empty() {
        // One pass over the folder's items instead of one per changed store
        tree::refresh_folder(db, folder)?;
        tracing::info!(target: "vfolder::sync", folder = %folder.name, added = added.len(), removed = removed.len(), "membership updated");
    }

    Ok(Reconciliation {
        folder: folder.name.clone(),
        added,
        removed,
    })
}

/// Reconciles one folder by name, or every folder when `name` is `None`.
pub fn run<S: DataStore>(db: &mut S, name: Option<&str>) -> Result<CmdResult> {
    let folders = match name {
        Some(name) => vec![db
            .find_folder(name)?
            .ok_or_else(|| VfolderError::FolderNotFound(name.to_string()))?],
        None => db.list_folders()?,
    };

    let mut result = CmdResult::default();
    if folders.is_empty() {
        result.add_message(CmdMessage::info("No virtual folders to sync."));
        return Ok(result);
    }

    for folder in folders {
        let rec = update_stores(db, &folder)?;
        result.add_message(describe(&rec));
        result.reconciliations.push(rec);
    }
    Ok(result)
}

pub(crate) fn describe(rec: &Reconciliation) -> CmdMessage {
    if rec.is_noop() {
        CmdMessage::info(format!("{}: up to date", rec.folder))
    } else {
        CmdMessage::success(format!(
            "{}: {} added, {} removed",
            rec.folder,
            rec.added.len(),
            rec.removed.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FolderScope;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn second_reconcile_is_a_noop() {
        let mut fixture = StoreFixture::new()
            .with_stores(&["/en/p1/a.po", "/en/p1/b.pot", "/fr/p2/c.po"])
            .with_global_folder("po", "*.po");
        let folder = fixture.folder("po");

        let (added, removed) = reconcile(&mut fixture.store, &folder).unwrap();
        assert_eq!(added.len(), 2);
        assert!(removed.is_empty());

        let (added, removed) = reconcile(&mut fixture.store, &folder).unwrap();
        assert!(added.is_empty());
        assert!(removed.is_empty());
    }

    #[test]
    fn rule_change_removes_stale_members() {
        let mut fixture = StoreFixture::new()
            .with_stores(&["/en/p1/docs/a.po", "/en/p1/ui/b.po"])
            .with_global_folder("f", "*.po");
        let mut folder = fixture.folder("f");
        update_stores(&mut fixture.store, &folder).unwrap();
        assert_eq!(fixture.store.folder_store_ids(&folder.id).unwrap().len(), 2);

        folder.filter_rules = vec!["docs/*".to_string()];
        fixture.store.save_folder(&folder).unwrap();
        let rec = update_stores(&mut fixture.store, &folder).unwrap();

        let ui = fixture.store_at("/en/p1/ui/b.po");
        assert!(rec.added.is_empty());
        assert_eq!(rec.removed, BTreeSet::from([ui.id]));
        assert!(!fixture.store.is_associated(&folder.id, &ui.id).unwrap());
    }

    #[test]
    fn membership_follows_scope() {
        let scope = FolderScope::from_lists(vec![], vec!["p1".to_string()]);
        let mut fixture = StoreFixture::new()
            .with_stores(&["/en/p1/a.po", "/de/p1/a.po", "/en/p2/a.po"])
            .with_folder("p1", scope, "*");
        let folder = fixture.folder("p1");

        let rec = update_stores(&mut fixture.store, &folder).unwrap();
        assert_eq!(rec.added.len(), 2);
        let outside = fixture.store_at("/en/p2/a.po");
        assert!(!rec.added.contains(&outside.id));
    }

    #[test]
    fn update_stores_sets_priority_and_tree() {
        let mut fixture = StoreFixture::new()
            .with_stores(&["/en/p1/glossary/terms.po", "/en/p1/docs/terms.po"])
            .with_prioritized_folder("glossary", "glossary/*.po", 4.0);
        let folder = fixture.folder("glossary");

        update_stores(&mut fixture.store, &folder).unwrap();

        let matched = fixture.store_at("/en/p1/glossary/terms.po");
        let unmatched = fixture.store_at("/en/p1/docs/terms.po");
        assert_eq!(matched.priority, 4.0);
        assert_eq!(unmatched.priority, 1.0);
        let item = fixture
            .store
            .get_tree_item(&folder.id, "/en/p1/glossary/")
            .unwrap()
            .unwrap();
        assert_eq!(item.pootle_path, "/en/p1/glossary/glossary/");
        assert_eq!(item.store_count, 1);
    }

    #[test]
    fn tree_counts_cover_every_changed_store() {
        let mut fixture = StoreFixture::new()
            .with_stores(&["/en/p1/top.po", "/en/p1/a/x.po", "/en/p1/a/b/y.po", "/en/p1/c/z.pot"])
            .with_global_folder("po", "*.po");
        let mut folder = fixture.folder("po");
        update_stores(&mut fixture.store, &folder).unwrap();

        let count = |fixture: &StoreFixture, dir: &str| {
            fixture
                .store
                .get_tree_item(&fixture.folder("po").id, dir)
                .unwrap()
                .map(|item| item.store_count)
        };
        assert_eq!(count(&fixture, "/en/p1/"), Some(3));
        assert_eq!(count(&fixture, "/en/p1/a/"), Some(2));
        assert_eq!(count(&fixture, "/en/p1/a/b/"), Some(1));
        assert_eq!(count(&fixture, "/en/p1/c/"), None);

        folder.filter_rules = vec!["a/*.po".to_string()];
        fixture.store.save_folder(&folder).unwrap();
        update_stores(&mut fixture.store, &folder).unwrap();
        assert_eq!(count(&fixture, "/en/p1/"), Some(2));
        assert_eq!(count(&fixture, "/en/p1/a/"), Some(2));
    }

    #[test]
    fn removal_resets_priority() {
        let mut fixture = StoreFixture::new()
            .with_stores(&["/en/p1/a.po"])
            .with_prioritized_folder("f", "*.po", 2.0);
        let mut folder = fixture.folder("f");
        update_stores(&mut fixture.store, &folder).unwrap();
        assert_eq!(fixture.store_at("/en/p1/a.po").priority, 2.0);

        folder.filter_rules = vec!["*.pot".to_string()];
        fixture.store.save_folder(&folder).unwrap();
        update_stores(&mut fixture.store, &folder).unwrap();
        assert_eq!(fixture.store_at("/en/p1/a.po").priority, 1.0);
    }

    #[test]
    fn dangling_association_is_dropped_silently() {
        let mut fixture = StoreFixture::new().with_global_folder("f", "*");
        let folder = fixture.folder("f");
        let ghost = Uuid::new_v4();
        fixture.store.add_associations(&folder.id, &[ghost]).unwrap();

        let rec = update_stores(&mut fixture.store, &folder).unwrap();
        assert_eq!(rec.removed, BTreeSet::from([ghost]));
        assert!(fixture.store.folder_store_ids(&folder.id).unwrap().is_empty());
    }

    #[test]
    fn run_syncs_all_folders_or_one() {
        let mut fixture = StoreFixture::new()
            .with_stores(&["/en/p1/a.po"])
            .with_global_folder("a", "*.po")
            .with_global_folder("b", "*");

        let result = run(&mut fixture.store, None).unwrap();
        assert_eq!(result.reconciliations.len(), 2);
        assert_eq!(result.reconciliations[0].folder, "a");

        let again = run(&mut fixture.store, Some("b")).unwrap();
        assert_eq!(again.reconciliations.len(), 1);
        assert!(again.reconciliations[0].is_noop());

        assert!(matches!(
            run(&mut fixture.store, Some("missing")),
            Err(VfolderError::FolderNotFound(_))
        ));
    }
}
