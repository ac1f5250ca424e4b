use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::matcher::PathMatcher;
use crate::store::DataStore;

use super::folders::get_by_name;

/// Dry run: the stores a folder would hold right now, without persisting.
pub fn run<S: DataStore>(db: &S, name: &str) -> Result<CmdResult> {
    let folder = get_by_name(db, name)?;
    let matcher = PathMatcher::new(&folder)?;
    let candidates = db.list_stores(&matcher.store_filter())?;
    let matching: Vec<_> = matcher
        .matching_stores(&candidates)
        .into_iter()
        .cloned()
        .collect();

    let existing = db.folder_store_ids(&folder.id)?;
    let pending = matching.iter().filter(|s| !existing.contains(&s.id)).count();
    let stale = existing.len() - (matching.len() - pending);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "{} matching store(s), {} to add, {} to remove",
        matching.len(),
        pending,
        stale
    )));
    Ok(result.with_listed_stores(matching))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn reports_pending_changes_without_applying() {
        let fixture = StoreFixture::new()
            .with_stores(&["/en/myproj/glossary/terms.po", "/en/myproj/docs/terms.po"])
            .with_global_folder("glossary", "glossary/*.po");

        let result = run(&fixture.store, "glossary").unwrap();
        assert_eq!(result.listed_stores.len(), 1);
        assert_eq!(
            result.messages[0].content,
            "1 matching store(s), 1 to add, 0 to remove"
        );

        let folder = fixture.folder("glossary");
        assert!(fixture.store.folder_store_ids(&folder.id).unwrap().is_empty());
    }
}
