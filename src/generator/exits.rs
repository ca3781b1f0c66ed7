//! Exit determination
//!
//! Each direction is drawn independently against its configured probability.
//! The entrance direction (the way back to the room that connected us) is
//! always included, and low-probability directions top the set up when the
//! draws under-produce against the minimum.

use std::collections::BTreeSet;

use rand::Rng;

use crate::templates::RoomTemplate;
use crate::types::Direction;

use super::GeneratorConfig;

/// Decide the exit directions for a room built from `template`.
///
/// `guaranteed` is always in the result regardless of its probability. The
/// probability draws respect `template.max_exits`; the minimum is the larger
/// of the template's own minimum and the generator-wide floor.
pub fn determine_exits<R: Rng>(
    template: &RoomTemplate,
    config: &GeneratorConfig,
    rng: &mut R,
    guaranteed: Option<Direction>,
) -> BTreeSet<Direction> {
    let mut exits = BTreeSet::new();
    if let Some(direction) = guaranteed {
        exits.insert(direction);
    }

    for direction in Direction::all() {
        if exits.len() >= template.max_exits {
            break;
        }
        if exits.contains(direction) {
            continue;
        }
        if rng.gen_bool(config.direction_probability(*direction)) {
            exits.insert(*direction);
        }
    }

    // Top up toward the minimum, least likely directions first, so the rare
    // vertical exits are the ones a forced top-up produces.
    let minimum = template.min_exits.max(config.min_exits_per_room);
    if exits.len() < minimum {
        let mut remaining: Vec<Direction> = Direction::all()
            .iter()
            .copied()
            .filter(|d| !exits.contains(d))
            .collect();
        remaining.sort_by(|a, b| {
            config
                .direction_probability(*a)
                .partial_cmp(&config.direction_probability(*b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for direction in remaining {
            if exits.len() >= minimum {
                break;
            }
            exits.insert(direction);
        }
    }

    exits
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::environment::Biome;
    use crate::templates::RoomArchetype;

    use super::*;

    fn template(min_exits: usize, max_exits: usize) -> RoomTemplate {
        RoomTemplate::new(
            "test_room",
            "Test Room",
            RoomArchetype::Chamber,
            Biome::Dungeon,
            "A test room.",
            min_exits,
            max_exits,
            1,
            &[],
        )
    }

    #[test]
    fn test_guaranteed_direction_always_present() {
        let config = GeneratorConfig::default();
        let template = template(1, 2);
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let exits = determine_exits(&template, &config, &mut rng, Some(Direction::Up));
            assert!(exits.contains(&Direction::Up), "seed {} dropped the guaranteed exit", seed);
        }
    }

    #[test]
    fn test_minimum_is_met() {
        let config = GeneratorConfig::default();
        let template = template(3, 4);
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let exits = determine_exits(&template, &config, &mut rng, None);
            assert!(exits.len() >= 3, "seed {} produced only {} exits", seed, exits.len());
        }
    }

    #[test]
    fn test_probability_draws_respect_maximum() {
        let config = GeneratorConfig::default();
        let template = template(1, 2);
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let exits = determine_exits(&template, &config, &mut rng, None);
            assert!(exits.len() <= 2, "seed {} exceeded max_exits", seed);
        }
    }

    /// An rng whose draws never succeed, so only the top-up path runs.
    struct NeverFires;

    impl rand::RngCore for NeverFires {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0xff);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_top_up_adds_least_likely_directions_first() {
        // Default config: up 0.1 < down 0.2 < compass 0.4. With no draws
        // firing, a minimum of two must be met by the two rarest directions.
        let config = GeneratorConfig::default();
        let template = template(2, 6);
        let exits = determine_exits(&template, &config, &mut NeverFires, None);
        assert_eq!(exits, BTreeSet::from([Direction::Up, Direction::Down]));
    }

    #[test]
    fn test_deterministic_per_seed() {
        let config = GeneratorConfig::default();
        let template = template(2, 4);
        let mut a = ChaCha8Rng::seed_from_u64(77);
        let mut b = ChaCha8Rng::seed_from_u64(77);
        assert_eq!(
            determine_exits(&template, &config, &mut a, Some(Direction::North)),
            determine_exits(&template, &config, &mut b, Some(Direction::North)),
        );
    }
}
