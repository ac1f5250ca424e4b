use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let report = store.doctor()?;
    let mut result = CmdResult::default();

    if report.dangling_associations == 0 && report.orphan_tree_items == 0 {
        result.add_message(CmdMessage::success("No inconsistencies found."));
    } else {
        result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
        if report.dangling_associations > 0 {
            result.add_message(CmdMessage::info(format!(
                "  - Removed {} association(s) to missing stores or folders.",
                report.dangling_associations
            )));
        }
        if report.orphan_tree_items > 0 {
            result.add_message(CmdMessage::info(format!(
                "  - Removed {} tree item(s) of deleted folders.",
                report.orphan_tree_items
            )));
        }
    }

    Ok(result)
}
