use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VfolderError};
use crate::events::{self, VfolderEvent};
use crate::model::{FolderScope, VirtualFolder};
use crate::priority;
use crate::rules::{parse_rules, RuleSet};
use crate::store::DataStore;
use chrono::Utc;

/// Fields for a new folder. Empty language/project lists mean "all".
#[derive(Debug, Clone, Default)]
pub struct NewFolder {
    pub name: String,
    pub description: String,
    pub rules: String,
    pub languages: Vec<String>,
    pub projects: Vec<String>,
    pub priority: f64,
    pub is_public: bool,
}

/// Changes to an existing folder; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct FolderEdit {
    pub description: Option<String>,
    pub rules: Option<String>,
    pub languages: Option<Vec<String>>,
    pub projects: Option<Vec<String>>,
    pub priority: Option<f64>,
    pub is_public: Option<bool>,
}

/// Save-time checks. Rules are compiled here so bad ones fail before they are
/// persisted.
pub fn validate<S: DataStore>(db: &S, folder: &VirtualFolder) -> Result<()> {
    let name = folder.name.trim();
    if name.is_empty() {
        return Err(VfolderError::Validation("Folder name cannot be empty".into()));
    }
    if name.contains('/') {
        return Err(VfolderError::Validation(format!(
            "Folder name '{}' cannot contain '/'",
            name
        )));
    }
    if !folder.priority.is_finite() || folder.priority < 0.0 {
        return Err(VfolderError::Validation(format!(
            "Priority must be a non-negative number, got {}",
            folder.priority
        )));
    }
    RuleSet::compile(&folder.filter_rules)?;

    if let Some(existing) = db.find_folder(name)? {
        if existing.id != folder.id {
            return Err(VfolderError::DuplicateFolder(name.to_string()));
        }
    }
    Ok(())
}

pub fn create<S: DataStore>(db: &mut S, input: NewFolder) -> Result<CmdResult> {
    let scope = FolderScope::from_lists(input.languages, input.projects);
    let mut folder = VirtualFolder::new(input.name.trim(), scope, &input.rules)
        .with_priority(input.priority)
        .with_description(input.description);
    folder.is_public = input.is_public;

    validate(db, &folder)?;
    db.save_folder(&folder)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Created virtual folder {} ({})",
        folder.name, folder.scope
    )));
    if folder.filter_rules.is_empty() {
        result.add_message(CmdMessage::warning(
            "Folder has no filter rules and will not match any store.",
        ));
    }
    result.merge(events::dispatch(db, VfolderEvent::FolderSaved(folder.id))?);
    result.listed_folders.push(folder);
    Ok(result)
}

pub fn edit<S: DataStore>(db: &mut S, name: &str, edit: FolderEdit) -> Result<CmdResult> {
    let mut folder = get_by_name(db, name)?;
    let old_priority = folder.priority;

    if let Some(description) = edit.description {
        folder.description = description;
    }
    if let Some(rules) = edit.rules {
        folder.filter_rules = parse_rules(&rules);
    }
    if let Some(languages) = edit.languages {
        folder.scope.all_languages = languages.is_empty();
        folder.scope.languages = languages.into_iter().collect();
    }
    if let Some(projects) = edit.projects {
        folder.scope.all_projects = projects.is_empty();
        folder.scope.projects = projects.into_iter().collect();
    }
    if let Some(priority) = edit.priority {
        folder.priority = priority;
    }
    if let Some(is_public) = edit.is_public {
        folder.is_public = is_public;
    }
    folder.updated_at = Utc::now();

    validate(db, &folder)?;
    let members_before = db.folder_store_ids(&folder.id)?;
    db.save_folder(&folder)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Updated virtual folder {}",
        folder.name
    )));
    result.merge(events::dispatch(db, VfolderEvent::FolderSaved(folder.id))?);

    // Reconciliation compares against the new priority, so both the members
    // that stayed and the ones just released are redone here
    if folder.priority != old_priority {
        let mut touched = members_before;
        touched.extend(db.folder_store_ids(&folder.id)?);
        for store_id in touched {
            match priority::set_priority(db, &store_id) {
                Ok(_) | Err(VfolderError::StoreNotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
    }

    result.listed_folders.push(folder);
    Ok(result)
}

pub fn delete<S: DataStore>(db: &mut S, name: &str) -> Result<CmdResult> {
    let folder = get_by_name(db, name)?;
    let held = db.delete_folder(&folder.id)?;

    for store_id in &held {
        match priority::set_priority(db, store_id) {
            Ok(_) | Err(VfolderError::StoreNotFound(_)) => {}
            Err(e) => return Err(e),
        }
    }

    tracing::info!(target: "vfolder::folders", folder = %folder.name, released = held.len(), "folder deleted");
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted virtual folder {} ({} store(s) released)",
        folder.name,
        held.len()
    )));
    Ok(result)
}

pub fn list<S: DataStore>(db: &S) -> Result<CmdResult> {
    let folders = db.list_folders()?;
    let mut result = CmdResult::default();
    if folders.is_empty() {
        result.add_message(CmdMessage::info("No virtual folders."));
    }
    Ok(result.with_listed_folders(folders))
}

pub fn show<S: DataStore>(db: &S, name: &str) -> Result<CmdResult> {
    let folder = get_by_name(db, name)?;
    let count = db.folder_store_ids(&folder.id)?.len();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!("{} store(s) associated", count)));
    Ok(result.with_listed_folders(vec![folder]))
}

pub fn get_by_name<S: DataStore>(db: &S, name: &str) -> Result<VirtualFolder> {
    db.find_folder(name)?
        .ok_or_else(|| VfolderError::FolderNotFound(name.to_string()))
}
