//! Threat-budget room population
//!
//! Each room gets a threat budget scaled by difficulty tier and depth, spent
//! on entity templates until nothing affordable remains. The entrance is
//! never populated. Boss-tier entities appear only in boss arenas, where one
//! is always placed.

use log::debug;
use rand::Rng;

use crate::dungeon::Dungeon;
use crate::templates::{EntityTemplate, EntityTemplateProvider, EntityTier, RoomArchetype};
use crate::types::DifficultyTier;
use crate::weighted::pick_weighted;

use super::GeneratorConfig;

/// Populate every eligible room of the dungeon with monsters.
pub fn populate_dungeon<P, R>(
    dungeon: &mut Dungeon,
    provider: &P,
    tier: DifficultyTier,
    config: &GeneratorConfig,
    rng: &mut R,
) where
    P: EntityTemplateProvider,
    R: Rng,
{
    // HashMap iteration order is arbitrary; a sorted id pass keeps the
    // random draws aligned across runs with the same seed.
    let mut room_ids: Vec<_> = dungeon.rooms().map(|r| r.id()).collect();
    room_ids.sort_unstable();

    let entrance = dungeon.entrance();
    let mut placed_total = 0usize;

    for room_id in room_ids {
        if room_id == entrance {
            continue;
        }
        let Some(room) = dungeon.room(room_id) else {
            continue;
        };

        let biome = room.biome();
        let archetype = room.archetype();
        let depth = room.position().depth();

        let candidates = provider.templates_by_biome(biome);
        if candidates.is_empty() {
            continue;
        }

        let is_boss_arena = archetype == RoomArchetype::BossArena;
        if !is_boss_arena && !rng.gen_bool(tier.population_chance()) {
            continue;
        }

        let modifier = config.depth_difficulty_modifier(depth);
        let mut budget = (tier.base_threat_budget() as f32 * modifier).round() as u32;
        let mut placements: Vec<String> = Vec::new();

        if is_boss_arena {
            let bosses: Vec<&EntityTemplate> = candidates
                .iter()
                .copied()
                .filter(|t| t.tier == EntityTier::Boss)
                .collect();
            if let Some(boss) = pick_weighted(&bosses, rng, |t| t.weight) {
                placements.push(boss.id.clone());
                budget = budget.saturating_sub(boss.threat_cost);
            }
        }

        // Boss-tier entities never roam outside their arena.
        let roster: Vec<&EntityTemplate> = candidates
            .iter()
            .copied()
            .filter(|t| t.tier != EntityTier::Boss)
            .collect();

        loop {
            let affordable: Vec<&EntityTemplate> = roster
                .iter()
                .copied()
                .filter(|t| t.threat_cost <= budget)
                .collect();
            if affordable.is_empty() {
                break;
            }

            let elites: Vec<&EntityTemplate> = affordable
                .iter()
                .copied()
                .filter(|t| t.tier.is_elite_or_better())
                .collect();
            let pool = if !elites.is_empty() && rng.gen_bool(tier.elite_bias()) {
                elites
            } else {
                affordable
            };

            let Some(choice) = pick_weighted(&pool, rng, |t| t.weight) else {
                break;
            };
            budget -= choice.threat_cost;
            placements.push(choice.id.clone());
        }

        if placements.is_empty() {
            continue;
        }
        placed_total += placements.len();
        if let Some(room) = dungeon.room_mut(room_id) {
            for template_id in &placements {
                room.add_monster(template_id);
            }
        }
    }

    debug!(
        "populated dungeon '{}' with {} monsters at tier {}",
        dungeon.name(),
        placed_total,
        tier
    );
}
