use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

use super::folders::get_by_name;

pub fn run<S: DataStore>(db: &S, name: &str) -> Result<CmdResult> {
    let folder = get_by_name(db, name)?;
    let items = db.list_tree_items(&folder.id)?;
    let mut result = CmdResult::default();
    if items.is_empty() {
        result.add_message(CmdMessage::info(format!("{} has no tree items yet.", folder.name)));
    }
    Ok(result.with_tree_items(items))
}
