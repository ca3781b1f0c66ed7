//! Room naming and description filling
//!
//! Fills the `{ADJ_*}` slots in template descriptions from descriptor word
//! pools and occasionally decorates the template's base name. Biome
//! definitions may override individual pools.

use rand::Rng;

use crate::environment::BiomeDefinition;
use crate::templates::RoomTemplate;
use crate::weighted::pick;

/// Descriptor slots recognized in template descriptions.
const SLOTS: &[(&str, &[&str])] = &[
    ("ADJ_SIZE", &["cramped", "narrow", "broad", "vast", "modest"]),
    ("ADJ_ATMOSPHERE", &["gloomy", "silent", "chill", "stale", "restless"]),
    ("ADJ_CONDITION", &["cracked", "dusty", "worn", "stained", "buckled"]),
];

/// Adjectives that sometimes prefix a room's display name.
const NAME_PREFIXES: &[&str] = &[
    "Ruined", "Silent", "Forgotten", "Sunken", "Haunted", "Broken",
];

/// Chance that a room name takes a prefix.
const NAME_PREFIX_CHANCE: f64 = 0.3;

/// Produce the display name for a room built from `template`.
pub fn room_name<R: Rng>(template: &RoomTemplate, rng: &mut R) -> String {
    if rng.gen_bool(NAME_PREFIX_CHANCE) {
        format!("{} {}", pick(rng, NAME_PREFIXES), template.name)
    } else {
        template.name.clone()
    }
}

/// Fill every descriptor slot in the template's description.
///
/// Pools from the biome definition win over the defaults; a slot the biome
/// does not override falls back to the built-in pool.
pub fn fill_description<R: Rng>(
    template: &RoomTemplate,
    biome_definition: Option<&BiomeDefinition>,
    rng: &mut R,
) -> String {
    let mut description = template.description.clone();
    for (slot, defaults) in SLOTS {
        let marker = format!("{{{}}}", slot);
        if !description.contains(&marker) {
            continue;
        }
        let word = match biome_definition
            .and_then(|d| d.descriptor_overrides.get(*slot))
            .filter(|pool| !pool.is_empty())
        {
            Some(pool) => pick(rng, pool).clone(),
            None => (*pick(rng, defaults)).to_string(),
        };
        description = description.replace(&marker, &word);
    }
    description
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::environment::Biome;
    use crate::templates::RoomArchetype;

    use super::*;

    fn template() -> RoomTemplate {
        RoomTemplate::new(
            "t",
            "Stone Passage",
            RoomArchetype::Corridor,
            Biome::Dungeon,
            "A {ADJ_SIZE} corridor, {ADJ_ATMOSPHERE} in the torchlight.",
            2,
            2,
            1,
            &[],
        )
    }

    #[test]
    fn test_description_has_no_unfilled_slots() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let description = fill_description(&template(), None, &mut rng);
        assert!(!description.contains('{'), "unfilled slot in: {}", description);
        assert!(!description.contains('}'));
    }

    #[test]
    fn test_biome_pool_overrides_default() {
        let definition = BiomeDefinition::new(Biome::Volcanic, "Volcanic", "")
            .with_descriptors("ADJ_ATMOSPHERE", &["smoldering"]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let description = fill_description(&template(), Some(&definition), &mut rng);
        assert!(description.contains("smoldering"), "got: {}", description);
    }

    #[test]
    fn test_naming_is_deterministic_per_seed() {
        let template = template();
        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = ChaCha8Rng::seed_from_u64(11);
        assert_eq!(room_name(&template, &mut a), room_name(&template, &mut b));
        assert_eq!(
            fill_description(&template, None, &mut a),
            fill_description(&template, None, &mut b),
        );
    }

    #[test]
    fn test_name_is_based_on_template_name() {
        let template = template();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..20 {
            let name = room_name(&template, &mut rng);
            assert!(name.ends_with("Stone Passage"), "unexpected name {}", name);
        }
    }
}
