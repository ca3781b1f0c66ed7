//! Environment configuration tables
//!
//! Categories, exclusion rules, and biome definitions arrive as one config
//! object, either from the built-in catalog or deserialized from JSON by an
//! external loader. Cross-references are checked once here, at load time; a
//! rule naming a category or value that does not exist is a configuration
//! bug and must never surface mid-generation.

use serde::{Deserialize, Serialize};

use crate::error::CoherenceError;

use super::biomes::{Biome, BiomeDefinition};
use super::categories::{CategoryValue, EnvironmentCategory};
use super::rules::{CategoryExclusionRule, RuleSeverity, RuleSide};

/// The full environment catalog consumed by the coherence engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub categories: Vec<EnvironmentCategory>,
    pub rules: Vec<CategoryExclusionRule>,
    pub biomes: Vec<BiomeDefinition>,
}

impl EnvironmentConfig {
    /// Deserialize a config from JSON. Validation still runs when the
    /// coherence engine is constructed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn category(&self, category_id: &str) -> Option<&EnvironmentCategory> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    /// Check every cross-reference in the catalog.
    ///
    /// Fails fast on: a category whose default value is not among its values,
    /// a rule side naming an unknown category or value, and a biome override
    /// naming an unknown category or value.
    pub fn validate(&self) -> Result<(), CoherenceError> {
        for category in &self.categories {
            if !category.has_value(&category.default_value) {
                return Err(CoherenceError::UnknownValue {
                    category_id: category.id.clone(),
                    value_id: category.default_value.clone(),
                });
            }
        }

        for rule in &self.rules {
            for side in [&rule.first, &rule.second] {
                let category = self.category(&side.category).ok_or_else(|| {
                    CoherenceError::RuleUnknownCategory {
                        rule_id: rule.id.clone(),
                        category_id: side.category.clone(),
                    }
                })?;
                for value in &side.values {
                    if !category.has_value(value) {
                        return Err(CoherenceError::RuleUnknownValue {
                            rule_id: rule.id.clone(),
                            category_id: side.category.clone(),
                            value_id: value.clone(),
                        });
                    }
                }
            }
        }

        for biome in &self.biomes {
            for (category_id, value_id) in &biome.category_overrides {
                let category = self.category(category_id).ok_or_else(|| {
                    CoherenceError::UnknownCategory {
                        category_id: category_id.clone(),
                    }
                })?;
                if !category.has_value(value_id) {
                    return Err(CoherenceError::UnknownValue {
                        category_id: category_id.clone(),
                        value_id: value_id.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// The default catalog: five categories, three exclusion rules, and the
    /// three generator biomes.
    pub fn builtin() -> Self {
        let categories = vec![
            EnvironmentCategory {
                id: "biome".to_string(),
                name: "Biome".to_string(),
                required: true,
                default_value: "dungeon".to_string(),
                values: vec![
                    CategoryValue::new("dungeon", "Dungeon", &["Stone", "Worked"]),
                    CategoryValue::new("cave", "Cave", &["Natural", "Echoing"]),
                    CategoryValue::new("volcanic", "Volcanic", &["Fire", "Sulfur"]),
                ],
            },
            EnvironmentCategory {
                id: "climate".to_string(),
                name: "Climate".to_string(),
                required: true,
                default_value: "temperate".to_string(),
                values: vec![
                    CategoryValue::new("freezing", "Freezing", &["Cold", "Ice"]),
                    CategoryValue::new("cold", "Cold", &["Cold"]),
                    CategoryValue::new("temperate", "Temperate", &[]),
                    CategoryValue::new("hot", "Hot", &["Heat"]),
                    CategoryValue::new("scorching", "Scorching", &["Heat", "Ash"]),
                ],
            },
            EnvironmentCategory {
                id: "lighting".to_string(),
                name: "Lighting".to_string(),
                required: true,
                default_value: "torchlit".to_string(),
                values: vec![
                    CategoryValue::new("dark", "Pitch Dark", &["Dark"]),
                    CategoryValue::new("torchlit", "Torchlit", &["Flickering"]),
                    CategoryValue::new("glowing", "Glowing", &["Luminous"]),
                    CategoryValue::new("daylight", "Daylight", &["Bright"]),
                ],
            },
            EnvironmentCategory {
                id: "era".to_string(),
                name: "Era".to_string(),
                required: false,
                default_value: "old".to_string(),
                values: vec![
                    CategoryValue::new("ancient", "Ancient", &["Ancient"]),
                    CategoryValue::new("old", "Old", &[]),
                    CategoryValue::new("recent", "Recent", &["Fresh"]),
                ],
            },
            EnvironmentCategory {
                id: "condition".to_string(),
                name: "Condition".to_string(),
                required: false,
                default_value: "worn".to_string(),
                values: vec![
                    CategoryValue::new("pristine", "Pristine", &["Pristine"]),
                    CategoryValue::new("worn", "Worn", &[]),
                    CategoryValue::new("ruined", "Ruined", &["Debris"]),
                    CategoryValue::new("collapsed", "Collapsed", &["Debris", "Blocked"]),
                ],
            },
        ];

        let rules = vec![
            CategoryExclusionRule::new(
                "volcanic-freezing",
                "molten rock cannot coexist with a freezing climate",
                RuleSide::new("biome", &["volcanic"]),
                RuleSide::new("climate", &["freezing", "cold"]),
                RuleSeverity::Hard,
            ),
            CategoryExclusionRule::new(
                "cave-daylight",
                "sunlight does not reach natural caverns",
                RuleSide::new("biome", &["cave"]),
                RuleSide::new("lighting", &["daylight"]),
                RuleSeverity::Hard,
            ),
            CategoryExclusionRule::new(
                "ancient-pristine",
                "ancient construction is rarely untouched by time",
                RuleSide::new("era", &["ancient"]),
                RuleSide::new("condition", &["pristine"]),
                RuleSeverity::Soft,
            ),
        ];

        let biomes = vec![
            BiomeDefinition::new(
                Biome::Dungeon,
                "Dungeon",
                "Worked stone halls raised by forgotten builders.",
            )
            .with_tags(&["Stone", "Ancient"])
            .with_descriptors("ADJ_ATMOSPHERE", &["gloomy", "silent", "watchful"]),
            BiomeDefinition::new(
                Biome::Cave,
                "Cave",
                "Natural caverns carved by water and time.",
            )
            .with_override("lighting", "dark")
            .with_override("climate", "cold")
            .with_tags(&["Natural", "Damp"])
            .with_descriptors("ADJ_ATMOSPHERE", &["dripping", "echoing", "lightless"]),
            BiomeDefinition::new(
                Biome::Volcanic,
                "Volcanic Depths",
                "Basalt galleries above slow rivers of fire.",
            )
            .with_override("climate", "scorching")
            .with_override("lighting", "glowing")
            .with_tags(&["Fire", "Sulfur"])
            .with_descriptors("ADJ_ATMOSPHERE", &["smoldering", "hazy", "roaring"]),
        ];

        Self {
            categories,
            rules,
            biomes,
        }
    }
}
