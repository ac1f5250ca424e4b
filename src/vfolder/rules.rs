//! Filter rule compilation.
//!
//! A rule is a glob over a store's relative path where `*` is the only
//! wildcard and may cross directory separators. Everything else is literal.
//! Matching is always anchored at both ends, so `*.po` never matches
//! `foo.po.bak`.

use crate::error::{Result, VfolderError};
use regex::Regex;

/// Regex body for a rule: escaped literals with `*` turned into `.*`.
pub fn rule_body(rule: &str) -> String {
    regex::escape(rule).replace("\\*", ".*")
}

/// Compiles a rule into a matcher for relative paths.
pub fn compile_rule(rule: &str) -> Result<Regex> {
    Regex::new(&format!("^{}$", rule_body(rule))).map_err(|source| VfolderError::InvalidRule {
        rule: rule.to_string(),
        source,
    })
}

/// Splits a comma separated rule list, trimming entries and dropping blanks.
pub fn parse_rules(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

/// The compiled rules of one virtual folder.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Regex>,
}

impl RuleSet {
    pub fn compile<I, R>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for rule in rules {
            let rule = rule.as_ref().trim();
            if rule.is_empty() {
                continue;
            }
            compiled.push(compile_rule(rule)?);
        }
        Ok(Self { rules: compiled })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// True when any rule matches the whole relative path.
    pub fn is_match(&self, relative_path: &str) -> bool {
        self.rules.iter().any(|re| re.is_match(relative_path))
    }
}
