use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vfolder")]
#[command(about = "Rule-based virtual folders over translation stores", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = "VFOLDER_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage virtual folders
    #[command(subcommand, alias = "f")]
    Folder(FolderCommands),

    /// Manage stores
    #[command(subcommand, alias = "s")]
    Store(StoreCommands),

    /// Reconcile folder membership against the current stores
    Sync {
        /// Folder name (all folders if omitted)
        name: Option<String>,
    },

    /// Show which stores a folder would hold, without saving
    Match { name: String },

    /// Show which folders a store path belongs to
    Find { path: String },

    /// Show the tree items of a folder
    Tree { name: String },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., default-priority)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Remove dangling associations and orphaned tree items
    Doctor,

    /// Initialize the data directory
    Init,
}

#[derive(Subcommand, Debug)]
pub enum FolderCommands {
    /// Create a folder and collect its matching stores
    #[command(alias = "n")]
    Create {
        name: String,

        #[command(flatten)]
        fields: FolderFields,
    },

    /// Change a folder and re-reconcile it
    #[command(alias = "e")]
    Edit {
        name: String,

        #[command(flatten)]
        fields: FolderFields,

        /// Drop the language restriction
        #[arg(long, conflicts_with = "language")]
        all_languages: bool,

        /// Drop the project restriction
        #[arg(long, conflicts_with = "project")]
        all_projects: bool,

        /// Make the folder public again
        #[arg(long, conflicts_with = "private")]
        public: bool,
    },

    /// List folders
    #[command(alias = "ls")]
    List,

    /// Show one folder
    Show { name: String },

    /// Delete a folder
    #[command(alias = "rm")]
    Delete { name: String },
}

#[derive(Args, Debug)]
pub struct FolderFields {
    /// Comma-separated glob rules relative to the project (e.g. "po/*.po, docs/*")
    #[arg(short, long)]
    pub rules: Option<String>,

    /// Restrict to a language (repeatable)
    #[arg(short, long)]
    pub language: Vec<String>,

    /// Restrict to a project (repeatable)
    #[arg(short, long)]
    pub project: Vec<String>,

    /// Folder priority
    #[arg(long)]
    pub priority: Option<f64>,

    #[arg(short, long)]
    pub description: Option<String>,

    /// Hide the folder from public listings
    #[arg(long)]
    pub private: bool,
}

#[derive(Subcommand, Debug)]
pub enum StoreCommands {
    /// Register stores and add them to matching folders
    Add {
        /// Pootle paths (e.g. /en/proj/po/messages.po)
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,
    },

    /// List stores
    #[command(alias = "ls")]
    List {
        /// Only stores held by this folder
        #[arg(short, long)]
        folder: Option<String>,
    },

    /// Remove a store
    #[command(alias = "rm")]
    Remove { path: String },
}
