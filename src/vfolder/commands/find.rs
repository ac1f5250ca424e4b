//! Inverse lookup: which folders should a newly created store join.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::matcher::PathMatcher;
use crate::model::{Store, VirtualFolder};
use crate::store::DataStore;
use crate::{priority, tree};
use uuid::Uuid;

/// Folders whose scope could include the store: the union of
/// all-languages folders listing its project, all-projects folders listing its
/// language, folders listing both, and global folders.
pub fn candidate_folders<S: DataStore>(db: &S, store: &Store) -> Result<Vec<VirtualFolder>> {
    let path = store.path()?;
    let (language, project) = (&path.language, &path.project);

    Ok(db
        .list_folders()?
        .into_iter()
        .filter(|f| {
            let s = &f.scope;
            (s.all_languages && s.projects.contains(project))
                || (s.all_projects && s.languages.contains(language))
                || (s.projects.contains(project) && s.languages.contains(language))
                || (s.all_languages && s.all_projects)
        })
        .collect())
}

/// Candidates the store matches and is not yet associated with.
pub fn find_folders_for<S: DataStore>(db: &S, store: &Store) -> Result<Vec<VirtualFolder>> {
    let mut found = Vec::new();
    for folder in candidate_folders(db, store)? {
        if should_add(db, &folder, store)? {
            found.push(folder);
        }
    }
    Ok(found)
}

fn should_add<S: DataStore>(db: &S, folder: &VirtualFolder, store: &Store) -> Result<bool> {
    let matcher = PathMatcher::new(folder)?;
    Ok(matcher.store_matches(store) && !db.is_associated(&folder.id, &store.id)?)
}

/// Associates a store with every folder it should join. Only adds, never
/// removes.
pub fn add_to_vfolders<S: DataStore>(db: &mut S, store_id: &Uuid) -> Result<CmdResult> {
    let store = db.get_store(store_id)?;
    let to_add = find_folders_for(db, &store)?;
    let mut result = CmdResult::default();

    if to_add.is_empty() {
        tracing::debug!(target: "vfolder::find", path = %store.pootle_path, "no virtual folders to join");
        return Ok(result);
    }

    for folder in &to_add {
        db.add_associations(&folder.id, &[store.id])?;
    }
    priority::set_priority(db, &store.id)?;
    for folder in &to_add {
        tree::update_vfolder_tree(db, folder, &store)?;
        result.add_message(CmdMessage::success(format!(
            "{} joined {}",
            store.pootle_path, folder.name
        )));
    }

    tracing::info!(target: "vfolder::find", path = %store.pootle_path, folders = to_add.len(), "store joined virtual folders");
    result.affected_stores.push(db.get_store(store_id)?);
    Ok(result.with_listed_folders(to_add))
}

/// Dry run for a path that need not exist yet: lists the folders it would
/// belong to, ignoring current associations.
pub fn preview<S: DataStore>(db: &S, pootle_path: &str) -> Result<CmdResult> {
    let store = match db.find_store(pootle_path)? {
        Some(store) => store,
        None => Store::new(pootle_path)?,
    };

    let mut matched = Vec::new();
    for folder in candidate_folders(db, &store)? {
        if PathMatcher::new(&folder)?.store_matches(&store) {
            matched.push(folder);
        }
    }

    let mut result = CmdResult::default();
    if matched.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "{} matches no virtual folder",
            store.pootle_path
        )));
    }
    Ok(result.with_listed_folders(matched))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sync;
    use crate::model::FolderScope;
    use crate::store::memory::fixtures::StoreFixture;

    fn scope(langs: &[&str], projs: &[&str]) -> FolderScope {
        FolderScope::from_lists(
            langs.iter().map(|s| s.to_string()),
            projs.iter().map(|s| s.to_string()),
        )
    }

    fn names(folders: &[VirtualFolder]) -> Vec<&str> {
        folders.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn candidates_are_the_scope_union() {
        let fixture = StoreFixture::new()
            .with_stores(&["/en/p/a.po"])
            .with_folder("a-all-langs-p", scope(&[], &["p"]), "*")
            .with_folder("b-all-projs-en", scope(&["en"], &[]), "*")
            .with_folder("c-en-p", scope(&["en"], &["p"]), "*")
            .with_global_folder("d-global", "*")
            .with_folder("x-fr-p2", scope(&["fr"], &["p2"]), "*")
            .with_folder("y-all-langs-p2", scope(&[], &["p2"]), "*")
            .with_folder("z-en-p2", scope(&["en"], &["p2"]), "*");
        let store = fixture.store_at("/en/p/a.po");

        let found = candidate_folders(&fixture.store, &store).unwrap();
        assert_eq!(
            names(&found),
            vec!["a-all-langs-p", "b-all-projs-en", "c-en-p", "d-global"]
        );
    }

    #[test]
    fn finder_adds_matching_folders_once() {
        let mut fixture = StoreFixture::new()
            .with_stores(&["/en/myproj/glossary/terms.po"])
            .with_global_folder("glossary", "glossary/*.po")
            .with_global_folder("docs", "docs/*.po");
        let store = fixture.store_at("/en/myproj/glossary/terms.po");

        let result = add_to_vfolders(&mut fixture.store, &store.id).unwrap();
        assert_eq!(names(&result.listed_folders), vec!["glossary"]);

        let glossary = fixture.folder("glossary");
        assert!(fixture.store.is_associated(&glossary.id, &store.id).unwrap());
        assert!(fixture
            .store
            .get_tree_item(&glossary.id, "/en/myproj/glossary/")
            .unwrap()
            .is_some());

        let again = add_to_vfolders(&mut fixture.store, &store.id).unwrap();
        assert!(again.listed_folders.is_empty());
    }

    #[test]
    fn finder_never_removes() {
        let mut fixture = StoreFixture::new()
            .with_stores(&["/en/p/a.po"])
            .with_global_folder("pot", "*.pot");
        let folder = fixture.folder("pot");
        let store = fixture.store_at("/en/p/a.po");
        // Stale association the finder must leave alone
        fixture.store.add_associations(&folder.id, &[store.id]).unwrap();

        add_to_vfolders(&mut fixture.store, &store.id).unwrap();
        assert!(fixture.store.is_associated(&folder.id, &store.id).unwrap());

        // A full reconcile is what clears it
        sync::update_stores(&mut fixture.store, &folder).unwrap();
        assert!(!fixture.store.is_associated(&folder.id, &store.id).unwrap());
    }

    #[test]
    fn finder_sets_priority_from_joined_folders() {
        let mut fixture = StoreFixture::new()
            .with_stores(&["/en/p/a.po"])
            .with_prioritized_folder("hi", "*.po", 7.0)
            .with_prioritized_folder("lo", "*", 2.0);
        let store = fixture.store_at("/en/p/a.po");

        let result = add_to_vfolders(&mut fixture.store, &store.id).unwrap();
        assert_eq!(result.affected_stores[0].priority, 7.0);
    }

    #[test]
    fn preview_does_not_persist() {
        let fixture = StoreFixture::new().with_global_folder("glossary", "glossary/*.po");

        let hit = preview(&fixture.store, "/en/myproj/glossary/terms.po").unwrap();
        assert_eq!(names(&hit.listed_folders), vec!["glossary"]);

        let miss = preview(&fixture.store, "/en/myproj/docs/terms.po").unwrap();
        assert!(miss.listed_folders.is_empty());
        assert_eq!(miss.messages.len(), 1);

        assert!(fixture.store.find_store("/en/myproj/glossary/terms.po").unwrap().is_none());
    }
}
