//! Explicit membership triggers.
//!
//! Mutation paths call [`dispatch`] with the entity they touched; nothing
//! recomputes membership implicitly. Between a mutation and its dispatch the
//! association table may be stale.

use crate::commands::{find, sync, CmdResult};
use crate::error::Result;
use crate::store::DataStore;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VfolderEvent {
    /// A folder was created or its rules/scope/priority changed.
    FolderSaved(Uuid),
    /// A store appeared.
    StoreCreated(Uuid),
}

pub fn dispatch<S: DataStore>(db: &mut S, event: VfolderEvent) -> Result<CmdResult> {
    tracing::debug!(target: "vfolder::events", ?event, "dispatching");
    match event {
        VfolderEvent::FolderSaved(id) => {
            let folder = db.get_folder(&id)?;
            let rec = sync::update_stores(db, &folder)?;
            let mut result = CmdResult::default();
            result.add_message(sync::describe(&rec));
            result.reconciliations.push(rec);
            Ok(result)
        }
        VfolderEvent::StoreCreated(id) => find::add_to_vfolders(db, &id),
    }
}
