//! Categorical environmental attributes
//!
//! Categories (biome, climate, lighting, era, condition) and their legal
//! values are static configuration, loaded once and shared read-only across
//! generation calls.

use serde::{Deserialize, Serialize};

/// One legal value of an environment category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryValue {
    /// Stable identifier, e.g. "freezing"
    pub id: String,
    /// Human-readable name, e.g. "Freezing"
    pub name: String,
    /// Tags implied by selecting this value, fed to descriptor consumers
    #[serde(default)]
    pub implied_tags: Vec<String>,
}

impl CategoryValue {
    pub fn new(id: &str, name: &str, implied_tags: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            implied_tags: implied_tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// A categorical environmental attribute with an ordered value set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentCategory {
    /// Stable identifier, e.g. "climate"
    pub id: String,
    /// Human-readable name, e.g. "Climate"
    pub name: String,
    /// Whether every context must carry a value for this category
    pub required: bool,
    /// Value selected when neither biome nor caller overrides it
    pub default_value: String,
    /// Legal values, in authored order
    pub values: Vec<CategoryValue>,
}

impl EnvironmentCategory {
    /// Look up a value by id.
    pub fn value(&self, value_id: &str) -> Option<&CategoryValue> {
        self.values.iter().find(|v| v.id == value_id)
    }

    /// Whether `value_id` is a legal value of this category.
    pub fn has_value(&self, value_id: &str) -> bool {
        self.value(value_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_category() -> EnvironmentCategory {
        EnvironmentCategory {
            id: "climate".to_string(),
            name: "Climate".to_string(),
            required: true,
            default_value: "temperate".to_string(),
            values: vec![
                CategoryValue::new("temperate", "Temperate", &[]),
                CategoryValue::new("freezing", "Freezing", &["cold", "ice"]),
            ],
        }
    }

    #[test]
    fn test_value_lookup() {
        let category = sample_category();
        assert!(category.has_value("freezing"));
        assert!(!category.has_value("boiling"));
        let freezing = category.value("freezing").unwrap();
        assert_eq!(freezing.implied_tags, vec!["cold", "ice"]);
    }
}
