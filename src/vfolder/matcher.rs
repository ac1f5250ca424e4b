//! Store membership for a single virtual folder.

use crate::error::Result;
use crate::model::{Store, VirtualFolder};
use crate::path::PootlePath;
use crate::rules::RuleSet;
use crate::store::StoreFilter;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Decides which stores belong to a virtual folder.
///
/// Only scope and rules are considered. When a store matches several folders
/// each membership is computed independently; priority is applied afterwards.
pub struct PathMatcher<'a> {
    folder: &'a VirtualFolder,
    rules: RuleSet,
}

impl<'a> PathMatcher<'a> {
    pub fn new(folder: &'a VirtualFolder) -> Result<Self> {
        let rules = RuleSet::compile(&folder.filter_rules)?;
        Ok(Self { folder, rules })
    }

    /// `None` when the folder applies to all languages.
    pub fn languages(&self) -> Option<&BTreeSet<String>> {
        if self.folder.scope.all_languages {
            None
        } else {
            Some(&self.folder.scope.languages)
        }
    }

    /// `None` when the folder applies to all projects.
    pub fn projects(&self) -> Option<&BTreeSet<String>> {
        if self.folder.scope.all_projects {
            None
        } else {
            Some(&self.folder.scope.projects)
        }
    }

    /// Query restricting a store lookup to this folder's scope.
    pub fn store_filter(&self) -> StoreFilter {
        StoreFilter {
            languages: self.languages().cloned(),
            projects: self.projects().cloned(),
        }
    }

    /// Whether a path relative to its translation project matches a rule.
    pub fn path_matches(&self, relative_path: &str) -> bool {
        self.rules.is_match(relative_path)
    }

    /// Scope check followed by the rule check. Unparseable paths never match.
    pub fn store_matches(&self, store: &Store) -> bool {
        if self.rules.is_empty() {
            return false;
        }
        match PootlePath::parse(&store.pootle_path) {
            Ok(path) => self.path_in_scope(&path) && self.path_matches(&path.relative()),
            Err(_) => false,
        }
    }

    fn path_in_scope(&self, path: &PootlePath) -> bool {
        let scope = &self.folder.scope;
        scope.includes_language(&path.language) && scope.includes_project(&path.project)
    }

    /// Filters candidates by language scope, then project scope, then rules.
    pub fn matching_stores<'s>(&self, candidates: &'s [Store]) -> Vec<&'s Store> {
        candidates
            .iter()
            .filter(|store| self.store_matches(store))
            .collect()
    }

    pub fn matching_ids(&self, candidates: &[Store]) -> BTreeSet<Uuid> {
        self.matching_stores(candidates)
            .into_iter()
            .map(|s| s.id)
            .collect()
    }
}
