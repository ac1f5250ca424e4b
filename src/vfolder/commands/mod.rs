use crate::config::VfolderConfig;
use crate::model::{Store, TreeItem, VirtualFolder};
use std::collections::BTreeSet;
use std::path::PathBuf;
use uuid::Uuid;

pub mod config;
pub mod doctor;
pub mod find;
pub mod folders;
pub mod init;
pub mod matching;
pub mod stores;
pub mod sync;
pub mod tree;

#[derive(Debug, Clone)]
pub struct VfolderPaths {
    pub data: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Membership delta applied to one folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub folder: String,
    pub added: BTreeSet<Uuid>,
    pub removed: BTreeSet<Uuid>,
}

impl Reconciliation {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_stores: Vec<Store>,
    pub listed_stores: Vec<Store>,
    pub listed_folders: Vec<VirtualFolder>,
    pub reconciliations: Vec<Reconciliation>,
    pub tree_items: Vec<TreeItem>,
    pub config: Option<VfolderConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_stores(mut self, stores: Vec<Store>) -> Self {
        self.listed_stores = stores;
        self
    }

    pub fn with_listed_folders(mut self, folders: Vec<VirtualFolder>) -> Self {
        self.listed_folders = folders;
        self
    }

    pub fn with_tree_items(mut self, items: Vec<TreeItem>) -> Self {
        self.tree_items = items;
        self
    }

    pub fn with_config(mut self, config: VfolderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Appends everything from another result.
    pub fn merge(&mut self, other: CmdResult) {
        self.affected_stores.extend(other.affected_stores);
        self.listed_stores.extend(other.listed_stores);
        self.listed_folders.extend(other.listed_folders);
        self.reconciliations.extend(other.reconciliations);
        self.tree_items.extend(other.tree_items);
        if other.config.is_some() {
            self.config = other.config;
        }
        self.messages.extend(other.messages);
    }
}
