//! Room and entity templates
//!
//! Archetype configuration consumed by the generator. Templates are
//! immutable, owned by a provider, and organized by biome; the generator
//! never synthesizes a fallback when a biome has no templates.

use serde::{Deserialize, Serialize};

use crate::environment::Biome;

/// Structural role a room template plays in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomArchetype {
    Corridor,
    Chamber,
    Junction,
    DeadEnd,
    BossArena,
    Stairwell,
}

impl RoomArchetype {
    pub fn all() -> &'static [RoomArchetype] {
        &[
            RoomArchetype::Corridor,
            RoomArchetype::Chamber,
            RoomArchetype::Junction,
            RoomArchetype::DeadEnd,
            RoomArchetype::BossArena,
            RoomArchetype::Stairwell,
        ]
    }

    /// Whether this archetype can serve as the dungeon entrance.
    pub fn entrance_suitable(&self) -> bool {
        matches!(self, RoomArchetype::Corridor | RoomArchetype::Junction)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RoomArchetype::Corridor => "Corridor",
            RoomArchetype::Chamber => "Chamber",
            RoomArchetype::Junction => "Junction",
            RoomArchetype::DeadEnd => "Dead End",
            RoomArchetype::BossArena => "Boss Arena",
            RoomArchetype::Stairwell => "Stairwell",
        }
    }
}

/// Immutable archetype configuration for one kind of room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTemplate {
    /// Stable identifier, e.g. "dungeon_corridor_01"
    pub id: String,
    /// Display name pool seed, e.g. "Stone Passage"
    pub name: String,
    pub archetype: RoomArchetype,
    pub biome: Biome,
    /// Description with `{ADJ_*}` slots filled at generation time
    pub description: String,
    pub min_exits: usize,
    pub max_exits: usize,
    /// Weight for weighted template selection
    pub weight: u32,
    /// Tags stamped onto rooms built from this template
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RoomTemplate {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        name: &str,
        archetype: RoomArchetype,
        biome: Biome,
        description: &str,
        min_exits: usize,
        max_exits: usize,
        weight: u32,
        tags: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            archetype,
            biome,
            description: description.to_string(),
            min_exits,
            max_exits,
            weight,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Power tier of an entity template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityTier {
    Minion,
    Standard,
    Elite,
    Boss,
}

impl EntityTier {
    pub fn is_elite_or_better(&self) -> bool {
        matches!(self, EntityTier::Elite | EntityTier::Boss)
    }
}

/// Immutable configuration for one creature kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTemplate {
    pub id: String,
    pub name: String,
    pub tier: EntityTier,
    /// Threat budget spent when this entity is placed
    pub threat_cost: u32,
    /// Biomes this entity can appear in
    pub biomes: Vec<Biome>,
    pub faction: String,
    pub weight: u32,
}

impl EntityTemplate {
    pub fn new(
        id: &str,
        name: &str,
        tier: EntityTier,
        threat_cost: u32,
        biomes: &[Biome],
        faction: &str,
        weight: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            tier,
            threat_cost,
            biomes: biomes.to_vec(),
            faction: faction.to_string(),
            weight,
        }
    }

    pub fn lives_in(&self, biome: Biome) -> bool {
        self.biomes.contains(&biome)
    }
}

/// Source of room templates. Implementations hold already-loaded,
/// in-memory configuration; no I/O happens during generation.
pub trait RoomTemplateProvider {
    fn all_templates(&self) -> &[RoomTemplate];

    fn templates_by_biome(&self, biome: Biome) -> Vec<&RoomTemplate> {
        self.all_templates()
            .iter()
            .filter(|t| t.biome == biome)
            .collect()
    }
}

/// Source of entity templates for room population.
pub trait EntityTemplateProvider {
    fn all_templates(&self) -> &[EntityTemplate];

    fn templates_by_biome(&self, biome: Biome) -> Vec<&EntityTemplate> {
        self.all_templates()
            .iter()
            .filter(|t| t.lives_in(biome))
            .collect()
    }

    fn templates_by_faction(&self, faction: &str) -> Vec<&EntityTemplate> {
        self.all_templates()
            .iter()
            .filter(|t| t.faction == faction)
            .collect()
    }
}

/// Built-in room template catalog.
pub struct BuiltinRoomTemplates {
    templates: Vec<RoomTemplate>,
}

impl Default for BuiltinRoomTemplates {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinRoomTemplates {
    pub fn new() -> Self {
        Self {
            templates: default_room_templates(),
        }
    }
}

impl RoomTemplateProvider for BuiltinRoomTemplates {
    fn all_templates(&self) -> &[RoomTemplate] {
        &self.templates
    }
}

/// Built-in entity template catalog.
pub struct BuiltinEntityTemplates {
    templates: Vec<EntityTemplate>,
}

impl Default for BuiltinEntityTemplates {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinEntityTemplates {
    pub fn new() -> Self {
        Self {
            templates: default_entity_templates(),
        }
    }
}

impl EntityTemplateProvider for BuiltinEntityTemplates {
    fn all_templates(&self) -> &[EntityTemplate] {
        &self.templates
    }
}

fn default_room_templates() -> Vec<RoomTemplate> {
    use Biome::*;
    use RoomArchetype::*;

    vec![
        // Dungeon — worked stone
        RoomTemplate::new(
            "dungeon_corridor_01", "Stone Passage", Corridor, Dungeon,
            "A {ADJ_SIZE} corridor of fitted stone blocks stretches ahead, {ADJ_ATMOSPHERE} in the torchlight.",
            2, 2, 3, &["Stone", "Ancient"],
        ),
        RoomTemplate::new(
            "dungeon_corridor_02", "Crumbling Hall", Corridor, Dungeon,
            "The ceiling has partially collapsed here. Rubble lines the {ADJ_CONDITION} floor.",
            2, 2, 2, &["Damaged", "Debris"],
        ),
        RoomTemplate::new(
            "dungeon_chamber_01", "Guard Room", Chamber, Dungeon,
            "A {ADJ_SIZE} chamber that once served as a guard post. Empty weapon racks line the walls.",
            2, 3, 2, &["Military", "Functional"],
        ),
        RoomTemplate::new(
            "dungeon_chamber_02", "Forgotten Library", Chamber, Dungeon,
            "Towering shelves dominate this {ADJ_SIZE} room; most volumes have crumbled to dust.",
            1, 2, 1, &["Scholarly", "Dusty"],
        ),
        RoomTemplate::new(
            "dungeon_junction_01", "Crossroads", Junction, Dungeon,
            "A {ADJ_SIZE} intersection where several passages meet, the stone tiles worn smooth.",
            3, 4, 3, &["Stone"],
        ),
        RoomTemplate::new(
            "dungeon_deadend_01", "Sealed Alcove", DeadEnd, Dungeon,
            "The passage ends at a wall of {ADJ_CONDITION} masonry. Something was bricked in here.",
            1, 1, 2, &["Sealed"],
        ),
        RoomTemplate::new(
            "dungeon_stairs_01", "Spiral Stair", Stairwell, Dungeon,
            "A {ADJ_ATMOSPHERE} stairwell corkscrews down into deeper darkness.",
            2, 3, 2, &["Stone", "Vertical"],
        ),
        RoomTemplate::new(
            "dungeon_boss_01", "Throne of the Deep King", BossArena, Dungeon,
            "A vaulted hall built for ceremony. Whatever holds court here now is no king.",
            1, 2, 1, &["Regal", "Vast"],
        ),
        // Cave — natural stone
        RoomTemplate::new(
            "cave_corridor_01", "Narrow Crawl", Corridor, Cave,
            "A {ADJ_SIZE} natural passage squeezes between slick stone walls, {ADJ_ATMOSPHERE}.",
            2, 2, 3, &["Natural", "Tight"],
        ),
        RoomTemplate::new(
            "cave_corridor_02", "Underground Stream", Corridor, Cave,
            "Cold water threads the floor of this passage, whispering over gravel.",
            2, 2, 2, &["Natural", "Wet"],
        ),
        RoomTemplate::new(
            "cave_chamber_01", "Dripstone Gallery", Chamber, Cave,
            "Stalactites hang over this {ADJ_SIZE} cavern like teeth. Every drip echoes twice.",
            2, 3, 2, &["Natural", "Echoing"],
        ),
        RoomTemplate::new(
            "cave_chamber_02", "Fungus Grove", Chamber, Cave,
            "Pale mushrooms carpet the floor, glowing faintly in the {ADJ_ATMOSPHERE} dark.",
            2, 3, 2, &["Natural", "Luminous"],
        ),
        RoomTemplate::new(
            "cave_junction_01", "Collapsed Sinkhole", Junction, Cave,
            "Several tunnels converge on a {ADJ_SIZE} sinkhole. Loose scree shifts underfoot.",
            3, 4, 2, &["Natural", "Unstable"],
        ),
        RoomTemplate::new(
            "cave_deadend_01", "Flooded Pocket", DeadEnd, Cave,
            "The tunnel dips into black, still water and goes no further.",
            1, 1, 2, &["Natural", "Wet"],
        ),
        RoomTemplate::new(
            "cave_stairs_01", "Chimney Shaft", Stairwell, Cave,
            "A rough vertical shaft, climbable by ledge and root, drops toward deeper caves.",
            2, 3, 2, &["Natural", "Vertical"],
        ),
        RoomTemplate::new(
            "cave_boss_01", "The Broodmother's Hollow", BossArena, Cave,
            "Web and bone carpet this vast hollow. The ceiling moves when you raise your light.",
            1, 2, 1, &["Natural", "Vast"],
        ),
        // Volcanic — fire and basalt
        RoomTemplate::new(
            "volcanic_corridor_01", "Basalt Gallery", Corridor, Volcanic,
            "A {ADJ_SIZE} gallery of cooled lava, its walls ribbed like frozen muscle, {ADJ_ATMOSPHERE}.",
            2, 2, 3, &["Fire", "Basalt"],
        ),
        RoomTemplate::new(
            "volcanic_chamber_01", "Cinder Vault", Chamber, Volcanic,
            "Heat shimmers over a floor of cracked obsidian. Vents hiss {ADJ_ATMOSPHERE} smoke.",
            2, 3, 2, &["Fire", "Ash"],
        ),
        RoomTemplate::new(
            "volcanic_junction_01", "Magma Crossing", Junction, Volcanic,
            "Stone bridges span a {ADJ_SIZE} chasm of slow-moving magma, meeting at a central pillar.",
            3, 4, 2, &["Fire", "Chasm"],
        ),
        RoomTemplate::new(
            "volcanic_deadend_01", "Choked Vent", DeadEnd, Volcanic,
            "The passage terminates in a vent plugged by cooled slag, still warm to the touch.",
            1, 1, 2, &["Fire", "Sealed"],
        ),
        RoomTemplate::new(
            "volcanic_boss_01", "The Forgeheart", BossArena, Volcanic,
            "An immense natural forge where the mountain's blood pools. The heat has a heartbeat.",
            1, 2, 1, &["Fire", "Vast"],
        ),
    ]
}

fn default_entity_templates() -> Vec<EntityTemplate> {
    use Biome::*;
    use EntityTier::*;

    vec![
        EntityTemplate::new("skeleton_thrall", "Skeleton Thrall", Minion, 2, &[Dungeon], "undead", 5),
        EntityTemplate::new("draugr_warden", "Draugr Warden", Standard, 4, &[Dungeon], "undead", 3),
        EntityTemplate::new("barrow_wight", "Barrow Wight", Elite, 7, &[Dungeon], "undead", 2),
        EntityTemplate::new("crypt_lord", "Crypt Lord", Boss, 12, &[Dungeon], "undead", 1),
        EntityTemplate::new("cave_rat", "Cave Rat", Minion, 1, &[Cave, Dungeon], "vermin", 5),
        EntityTemplate::new("cave_crawler", "Cave Crawler", Standard, 4, &[Cave], "vermin", 3),
        EntityTemplate::new("web_matron", "Web Matron", Elite, 8, &[Cave], "vermin", 2),
        EntityTemplate::new("worm_that_gnaws", "The Worm That Gnaws", Boss, 13, &[Cave], "vermin", 1),
        EntityTemplate::new("cinder_imp", "Cinder Imp", Minion, 2, &[Volcanic], "elemental", 5),
        EntityTemplate::new("ash_revenant", "Ash Revenant", Standard, 5, &[Volcanic], "elemental", 3),
        EntityTemplate::new("magma_elemental", "Magma Elemental", Elite, 8, &[Volcanic], "elemental", 2),
        EntityTemplate::new("surtling_herald", "Surtling Herald", Boss, 14, &[Volcanic], "elemental", 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_biome_has_templates() {
        let provider = BuiltinRoomTemplates::new();
        for biome in Biome::all() {
            assert!(
                !provider.templates_by_biome(*biome).is_empty(),
                "biome {} has no room templates",
                biome
            );
        }
    }

    #[test]
    fn test_every_biome_has_entrance_and_boss() {
        let provider = BuiltinRoomTemplates::new();
        for biome in Biome::all() {
            let templates = provider.templates_by_biome(*biome);
            assert!(templates.iter().any(|t| t.archetype.entrance_suitable()));
            assert!(templates.iter().any(|t| t.archetype == RoomArchetype::BossArena));
        }
    }

    #[test]
    fn test_template_ids_unique() {
        let provider = BuiltinRoomTemplates::new();
        let mut ids: Vec<&str> = provider.all_templates().iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(before, ids.len());
    }

    #[test]
    fn test_exit_bounds_sane() {
        for template in BuiltinRoomTemplates::new().all_templates() {
            assert!(template.min_exits >= 1);
            assert!(template.min_exits <= template.max_exits);
            assert!(template.max_exits <= 6);
        }
    }

    #[test]
    fn test_entity_catalog_covers_tiers_per_biome() {
        let provider = BuiltinEntityTemplates::new();
        for biome in Biome::all() {
            let templates = provider.templates_by_biome(*biome);
            assert!(templates.iter().any(|t| t.tier == EntityTier::Minion));
            assert!(templates.iter().any(|t| t.tier == EntityTier::Boss));
        }
    }

    #[test]
    fn test_faction_lookup() {
        let provider = BuiltinEntityTemplates::new();
        let undead = provider.templates_by_faction("undead");
        assert_eq!(undead.len(), 4);
        assert!(undead.iter().all(|t| t.faction == "undead"));
    }
}
