//! # Vfolder Architecture
//!
//! Vfolder groups translation stores into **virtual folders**: named views
//! defined by glob rules over store paths plus a language/project scope. A
//! store at `/<language>/<project>/<dir>/<file>` belongs to a folder when its
//! language and project are in the folder's scope and its path below the
//! project matches at least one rule.
//!
//! Membership is persisted as an association table and is **not** kept in sync
//! automatically. It is recomputed on demand:
//!
//! - when a folder is saved, the **reconciler** (`commands::sync`) diffs the
//!   current members against the matching stores and applies adds/removes
//! - when a store is created, the **finder** (`commands::find`) looks up the
//!   folders it should join and only ever adds
//!
//! Both triggers go through [`events::dispatch`], called directly from the
//! mutation paths.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, prints results, sets up logging        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, returns CmdResult             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, events.rs)                   │
//! │  - Reconciler, finder, folder/store management              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (rules.rs, matcher.rs, tree.rs, priority.rs)        │
//! │  Storage Layer (store/)                                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Reconciliation, lookup and management operations
//! - [`events`]: Explicit membership triggers
//! - [`rules`]: Glob-to-regex rule compiler
//! - [`matcher`]: Per-folder membership test
//! - [`path`]: Pootle path parsing
//! - [`tree`]: Virtual-folder tree cache
//! - [`priority`]: Store priority from folder membership
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod matcher;
pub mod model;
pub mod path;
pub mod priority;
pub mod rules;
pub mod store;
pub mod tree;
