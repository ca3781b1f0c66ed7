//! Environment contexts and validation results
//!
//! A context is an immutable snapshot of selected category values plus the
//! tag set derived from them. Corrections never mutate a context; they build
//! a new one.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::rules::RuleSeverity;

/// Selected category values plus derived descriptive tags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentContext {
    selections: BTreeMap<String, String>,
    tags: BTreeSet<String>,
}

impl EnvironmentContext {
    pub fn new(selections: BTreeMap<String, String>, tags: BTreeSet<String>) -> Self {
        Self { selections, tags }
    }

    /// Build a context from (category, value) pairs with no derived tags.
    /// Mostly useful for validation checks and tests.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let selections = pairs
            .iter()
            .map(|(c, v)| (c.to_string(), v.to_string()))
            .collect();
        Self {
            selections,
            tags: BTreeSet::new(),
        }
    }

    /// The selected value for a category, if the context carries one.
    pub fn value(&self, category_id: &str) -> Option<&str> {
        self.selections.get(category_id).map(String::as_str)
    }

    pub fn selections(&self) -> &BTreeMap<String, String> {
        &self.selections
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// A copy of this context with one selection replaced.
    ///
    /// Tags are not re-derived; callers that need tags rebuild through the
    /// coherence engine.
    pub fn with_value(&self, category_id: &str, value_id: &str) -> Self {
        let mut selections = self.selections.clone();
        selections.insert(category_id.to_string(), value_id.to_string());
        Self {
            selections,
            tags: self.tags.clone(),
        }
    }
}

/// One exclusion rule that fired against a context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_id: String,
    pub reason: String,
    pub severity: RuleSeverity,
}

impl Violation {
    pub fn is_hard(&self) -> bool {
        self.severity == RuleSeverity::Hard
    }
}

/// Outcome of validating a context against every configured exclusion rule.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn has_hard_violations(&self) -> bool {
        self.violations.iter().any(Violation::is_hard)
    }

    /// True when the context is invalid but every violation is soft.
    pub fn has_soft_violations_only(&self) -> bool {
        !self.violations.is_empty() && !self.has_hard_violations()
    }
}
