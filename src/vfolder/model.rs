use crate::error::Result;
use crate::path::PootlePath;
use crate::rules::parse_rules;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

pub const DEFAULT_PRIORITY: f64 = 1.0;

fn default_priority() -> f64 {
    DEFAULT_PRIORITY
}

fn default_true() -> bool {
    true
}

/// A translatable resource, addressed by its pootle path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: Uuid,
    pub pootle_path: String,
    // Highest priority among the folders holding this store
    #[serde(default = "default_priority")]
    pub priority: f64,
}

impl Store {
    pub fn new(pootle_path: &str) -> Result<Self> {
        let parsed = PootlePath::parse(pootle_path)?;
        Ok(Self {
            id: Uuid::new_v4(),
            pootle_path: parsed.to_string(),
            priority: DEFAULT_PRIORITY,
        })
    }

    pub fn path(&self) -> Result<PootlePath> {
        PootlePath::parse(&self.pootle_path)
    }
}

/// The language/project restriction of a virtual folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderScope {
    pub all_languages: bool,
    pub all_projects: bool,
    #[serde(default)]
    pub languages: BTreeSet<String>,
    #[serde(default)]
    pub projects: BTreeSet<String>,
}

impl FolderScope {
    /// Applies to every store in the installation.
    pub fn global() -> Self {
        Self {
            all_languages: true,
            all_projects: true,
            ..Self::default()
        }
    }

    /// Builds a scope where an empty list means "all".
    pub fn from_lists<L, P>(languages: L, projects: P) -> Self
    where
        L: IntoIterator<Item = String>,
        P: IntoIterator<Item = String>,
    {
        let languages: BTreeSet<String> = languages.into_iter().collect();
        let projects: BTreeSet<String> = projects.into_iter().collect();
        Self {
            all_languages: languages.is_empty(),
            all_projects: projects.is_empty(),
            languages,
            projects,
        }
    }

    pub fn includes_language(&self, language: &str) -> bool {
        self.all_languages || self.languages.contains(language)
    }

    pub fn includes_project(&self, project: &str) -> bool {
        self.all_projects || self.projects.contains(project)
    }
}

impl std::fmt::Display for FolderScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let describe = |all: bool, set: &BTreeSet<String>| {
            if all {
                "*".to_string()
            } else {
                set.iter().cloned().collect::<Vec<_>>().join(",")
            }
        };
        write!(
            f,
            "languages={} projects={}",
            describe(self.all_languages, &self.languages),
            describe(self.all_projects, &self.projects)
        )
    }
}

/// A named, rule-defined view grouping stores across translation projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualFolder {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default = "default_priority")]
    pub priority: f64,
    #[serde(flatten)]
    pub scope: FolderScope,
    #[serde(default)]
    pub filter_rules: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VirtualFolder {
    pub fn new(name: impl Into<String>, scope: FolderScope, filter_rules: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            is_public: true,
            priority: DEFAULT_PRIORITY,
            scope,
            filter_rules: parse_rules(filter_rules),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn rules_display(&self) -> String {
        self.filter_rules.join(", ")
    }
}

/// Derived node exposing one real directory inside a virtual folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeItem {
    pub vfolder_id: Uuid,
    /// Real directory, e.g. `/en/proj/sub/`.
    pub directory: String,
    /// Virtual path, e.g. `/en/proj/<folder>/sub/`.
    pub pootle_path: String,
    /// Associated stores at or below `directory`.
    pub store_count: usize,
    pub refreshed_at: DateTime<Utc>,
}
