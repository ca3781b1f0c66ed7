//! Environment coherence engine
//!
//! Validates environment contexts against the configured exclusion rules and
//! builds contexts from biome defaults plus overrides. Hard violations are
//! refused outright; soft violations pass through as advisory data so that
//! deliberately authored, slightly incongruous content stays possible.

use log::debug;

use crate::error::CoherenceError;

use super::biomes::BiomeDefinition;
use super::categories::CategoryValue;
use super::config::EnvironmentConfig;
use super::context::{EnvironmentContext, ValidationResult, Violation};

/// Category whose selection is pinned to the biome a context is built from.
const BIOME_CATEGORY: &str = "biome";

/// A context built from a biome, together with any soft violations the
/// caller may want to log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextBuildOutcome {
    pub context: EnvironmentContext,
    pub soft_violations: Vec<Violation>,
}

/// Validation and context construction over one environment catalog.
pub struct CoherenceEngine {
    config: EnvironmentConfig,
}

impl CoherenceEngine {
    /// Construct an engine, checking the catalog's cross-references once.
    pub fn new(config: EnvironmentConfig) -> Result<Self, CoherenceError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Engine over the built-in catalog.
    pub fn with_builtin() -> Self {
        // The builtin catalog is covered by config tests; skipping validate
        // here keeps this constructor infallible.
        Self {
            config: EnvironmentConfig::builtin(),
        }
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    /// Evaluate every exclusion rule against the context.
    pub fn validate(&self, context: &EnvironmentContext) -> ValidationResult {
        let violations = self
            .config
            .rules
            .iter()
            .filter(|rule| rule.fires(context))
            .map(|rule| Violation {
                rule_id: rule.id.clone(),
                reason: rule.reason.clone(),
                severity: rule.severity,
            })
            .collect();
        ValidationResult { violations }
    }

    /// Build a context from a biome's defaults plus caller overrides.
    ///
    /// Selection order: global category defaults, then the biome's
    /// overrides, then the caller's (caller wins). The derived tag set is
    /// the union of every selected value's implied tags and the biome's own
    /// implied tags. A hard violation in the result is an error; soft
    /// violations ride along in the outcome.
    pub fn create_from_biome(
        &self,
        biome_id: &str,
        overrides: &[(&str, &str)],
    ) -> Result<ContextBuildOutcome, CoherenceError> {
        let definition = self
            .biome(biome_id)
            .ok_or_else(|| CoherenceError::UnknownBiome {
                biome_id: biome_id.to_string(),
            })?;

        let mut selections = std::collections::BTreeMap::new();
        for category in &self.config.categories {
            selections.insert(category.id.clone(), category.default_value.clone());
        }
        if self.config.category(BIOME_CATEGORY).is_some() {
            selections.insert(BIOME_CATEGORY.to_string(), definition.id().to_string());
        }
        for (category_id, value_id) in &definition.category_overrides {
            selections.insert(category_id.clone(), value_id.clone());
        }
        for (category_id, value_id) in overrides {
            let category = self.config.category(category_id).ok_or_else(|| {
                CoherenceError::UnknownCategory {
                    category_id: category_id.to_string(),
                }
            })?;
            if !category.has_value(value_id) {
                return Err(CoherenceError::UnknownValue {
                    category_id: category_id.to_string(),
                    value_id: value_id.to_string(),
                });
            }
            selections.insert(category_id.to_string(), value_id.to_string());
        }

        let mut tags = std::collections::BTreeSet::new();
        for (category_id, value_id) in &selections {
            if let Some(value) = self
                .config
                .category(category_id)
                .and_then(|c| c.value(value_id))
            {
                tags.extend(value.implied_tags.iter().cloned());
            }
        }
        tags.extend(definition.implied_tags.iter().cloned());

        let context = EnvironmentContext::new(selections, tags);
        let result = self.validate(&context);

        if let Some(hard) = result.violations.iter().find(|v| v.is_hard()) {
            return Err(CoherenceError::InvalidCombination {
                rule_id: hard.rule_id.clone(),
                reason: hard.reason.clone(),
            });
        }

        let soft_violations: Vec<Violation> = result.violations;
        for violation in &soft_violations {
            debug!(
                "context for biome '{}' carries soft violation '{}': {}",
                biome_id, violation.rule_id, violation.reason
            );
        }

        Ok(ContextBuildOutcome {
            context,
            soft_violations,
        })
    }

    /// Every value of `category_id` whose adoption would not introduce a
    /// hard violation. Soft-conflicting values stay in the list; they are
    /// advisory, not impossible.
    pub fn valid_values(
        &self,
        category_id: &str,
        context: &EnvironmentContext,
    ) -> Vec<&CategoryValue> {
        let Some(category) = self.config.category(category_id) else {
            return Vec::new();
        };

        category
            .values
            .iter()
            .filter(|value| {
                let candidate = context.with_value(category_id, &value.id);
                !self.validate(&candidate).has_hard_violations()
            })
            .collect()
    }

    /// Biome definition lookup; `None` for unknown ids so existence checks
    /// stay cheap.
    pub fn biome(&self, biome_id: &str) -> Option<&BiomeDefinition> {
        self.config.biomes.iter().find(|b| b.id() == biome_id)
    }

    pub fn biomes(&self) -> impl Iterator<Item = &BiomeDefinition> {
        self.config.biomes.iter()
    }
}
