//! Dungeon biomes and their environmental defaults
//!
//! A biome is the environmental theme of a dungeon level: it picks default
//! category values, contributes implied tags, and may override the
//! descriptor word pools used when filling room descriptions.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Biomes available to the dungeon generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Biome {
    Dungeon,
    Cave,
    Volcanic,
}

impl Biome {
    pub fn all() -> &'static [Biome] {
        &[Biome::Dungeon, Biome::Cave, Biome::Volcanic]
    }

    /// Stable id used by the coherence engine and config tables.
    pub fn id(&self) -> &'static str {
        match self {
            Biome::Dungeon => "dungeon",
            Biome::Cave => "cave",
            Biome::Volcanic => "volcanic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Biome::Dungeon => "Dungeon",
            Biome::Cave => "Cave",
            Biome::Volcanic => "Volcanic Depths",
        }
    }

    /// Parse a biome id.
    pub fn from_id(id: &str) -> Option<Biome> {
        Biome::all().iter().find(|b| b.id() == id).copied()
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Static configuration for one biome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiomeDefinition {
    pub biome: Biome,
    pub name: String,
    pub description: String,
    /// Category values this biome selects instead of the global defaults
    #[serde(default)]
    pub category_overrides: BTreeMap<String, String>,
    /// Tags every context built from this biome carries
    #[serde(default)]
    pub implied_tags: Vec<String>,
    /// Descriptor pools replacing the generator's defaults, keyed by slot
    /// name (e.g. "ADJ_ATMOSPHERE")
    #[serde(default)]
    pub descriptor_overrides: BTreeMap<String, Vec<String>>,
}

impl BiomeDefinition {
    pub fn new(biome: Biome, name: &str, description: &str) -> Self {
        Self {
            biome,
            name: name.to_string(),
            description: description.to_string(),
            category_overrides: BTreeMap::new(),
            implied_tags: Vec::new(),
            descriptor_overrides: BTreeMap::new(),
        }
    }

    pub fn with_override(mut self, category_id: &str, value_id: &str) -> Self {
        self.category_overrides
            .insert(category_id.to_string(), value_id.to_string());
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.implied_tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_descriptors(mut self, slot: &str, words: &[&str]) -> Self {
        self.descriptor_overrides
            .insert(slot.to_string(), words.iter().map(|w| w.to_string()).collect());
        self
    }

    pub fn id(&self) -> &'static str {
        self.biome.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biome_id_round_trip() {
        for biome in Biome::all() {
            assert_eq!(Biome::from_id(biome.id()), Some(*biome));
        }
        assert_eq!(Biome::from_id("swamp"), None);
    }

    #[test]
    fn test_builder_overrides() {
        let def = BiomeDefinition::new(Biome::Volcanic, "Volcanic Depths", "Rivers of fire.")
            .with_override("climate", "scorching")
            .with_tags(&["Fire", "Ash"]);
        assert_eq!(def.category_overrides.get("climate").map(String::as_str), Some("scorching"));
        assert!(def.implied_tags.contains(&"Ash".to_string()));
    }
}
