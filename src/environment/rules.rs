//! Pairwise exclusion rules between category values
//!
//! A rule fires when the context's value for the first category is in the
//! first value set AND its value for the second category is in the second
//! value set. Hard rules mark combinations that are physically or logically
//! impossible; soft rules mark combinations that are merely improbable and
//! may still be authored deliberately.

use serde::{Deserialize, Serialize};

use super::context::EnvironmentContext;

/// How strictly an exclusion rule is enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleSeverity {
    /// Impossible combination; construction helpers refuse it
    Hard,
    /// Improbable combination; reported but allowed through
    Soft,
}

/// One side of an exclusion rule: a category and the values that match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSide {
    pub category: String,
    pub values: Vec<String>,
}

impl RuleSide {
    pub fn new(category: &str, values: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Whether this side matches the given context.
    ///
    /// A category absent from the context never matches, so rules stay inert
    /// for partial contexts.
    fn matches(&self, context: &EnvironmentContext) -> bool {
        match context.value(&self.category) {
            Some(selected) => self.values.iter().any(|v| v == selected),
            None => false,
        }
    }
}

/// A declarative constraint forbidding or discouraging a value pairing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryExclusionRule {
    /// Stable identifier, e.g. "volcanic-freezing"
    pub id: String,
    /// Human-readable justification, surfaced in violations
    pub reason: String,
    pub first: RuleSide,
    pub second: RuleSide,
    pub severity: RuleSeverity,
}

impl CategoryExclusionRule {
    pub fn new(id: &str, reason: &str, first: RuleSide, second: RuleSide, severity: RuleSeverity) -> Self {
        Self {
            id: id.to_string(),
            reason: reason.to_string(),
            first,
            second,
            severity,
        }
    }

    /// Whether both sides match the context.
    pub fn fires(&self, context: &EnvironmentContext) -> bool {
        self.first.matches(context) && self.second.matches(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volcanic_freezing() -> CategoryExclusionRule {
        CategoryExclusionRule::new(
            "volcanic-freezing",
            "molten rock cannot coexist with freezing air",
            RuleSide::new("biome", &["volcanic"]),
            RuleSide::new("climate", &["freezing"]),
            RuleSeverity::Hard,
        )
    }

    #[test]
    fn test_rule_fires_when_both_sides_match() {
        let rule = volcanic_freezing();
        let context =
            EnvironmentContext::from_pairs(&[("biome", "volcanic"), ("climate", "freezing")]);
        assert!(rule.fires(&context));
    }

    #[test]
    fn test_rule_silent_when_one_side_differs() {
        let rule = volcanic_freezing();
        let context =
            EnvironmentContext::from_pairs(&[("biome", "volcanic"), ("climate", "scorching")]);
        assert!(!rule.fires(&context));
    }

    #[test]
    fn test_rule_silent_when_category_missing() {
        let rule = volcanic_freezing();
        let context = EnvironmentContext::from_pairs(&[("biome", "volcanic")]);
        assert!(!rule.fires(&context));
    }
}
