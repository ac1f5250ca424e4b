use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum VfolderError {
    #[error("Virtual folder not found: {0}")]
    FolderNotFound(String),

    #[error("Store not found: {0}")]
    StoreNotFound(String),

    #[error("A virtual folder named '{0}' already exists")]
    DuplicateFolder(String),

    #[error("A store already exists at {0}")]
    DuplicateStore(String),

    #[error("Invalid pootle path '{0}': expected /language/project/[dir/]file")]
    InvalidPath(String),

    #[error("Invalid filter rule '{rule}': {source}")]
    InvalidRule {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl VfolderError {
    pub fn folder_id(id: &Uuid) -> Self {
        VfolderError::FolderNotFound(id.to_string())
    }

    pub fn store_id(id: &Uuid) -> Self {
        VfolderError::StoreNotFound(id.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VfolderError>;
