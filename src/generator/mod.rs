//! Seeded dungeon generation
//!
//! Builds a connected room graph from weighted template draws: entrance
//! first, then growth one room at a time, each new room wired to an already
//! placed one through a bidirectional exit pair, boss arena reserved for the
//! final slot, then tagging and threat-budget population.

pub mod depth;
pub mod exits;
pub mod naming;
pub mod population;

use std::collections::{BTreeSet, HashMap};

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::dungeon::{Dungeon, Room};
use crate::environment::{Biome, CoherenceEngine};
use crate::error::GenerationError;
use crate::seeds::GenerationSeeds;
use crate::templates::{
    BuiltinEntityTemplates, BuiltinRoomTemplates, EntityTemplateProvider, RoomArchetype,
    RoomTemplate, RoomTemplateProvider,
};
use crate::types::{DifficultyTier, Direction, Position, RoomId};
use crate::weighted::pick_weighted;

pub use depth::{biome_for_depth, depth_profile, DepthProfile};
pub use exits::determine_exits;

/// Tunables for the dungeon generator.
#[derive(Clone, Copy, Debug)]
pub struct GeneratorConfig {
    /// Smallest dungeon the generator will build
    pub min_room_count: usize,
    /// Floor on exits per room, on top of each template's own minimum
    pub min_exits_per_room: usize,
    /// Threat budget growth per level of depth
    pub depth_difficulty_multiplier: f32,
    /// Draw probability for each compass exit
    pub compass_exit_probability: f64,
    /// Draw probability for an upward exit
    pub up_exit_probability: f64,
    /// Draw probability for a downward exit
    pub down_exit_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_room_count: 3,
            min_exits_per_room: 1,
            depth_difficulty_multiplier: 0.15,
            compass_exit_probability: 0.4,
            up_exit_probability: 0.1,
            down_exit_probability: 0.2,
        }
    }
}

impl GeneratorConfig {
    /// Draw probability for one direction.
    pub fn direction_probability(&self, direction: Direction) -> f64 {
        match direction {
            Direction::North | Direction::South | Direction::East | Direction::West => {
                self.compass_exit_probability
            }
            Direction::Up => self.up_exit_probability,
            Direction::Down => self.down_exit_probability,
        }
    }

    /// Threat multiplier at a given depth: 1.0 at the entrance level,
    /// strictly increasing below it.
    pub fn depth_difficulty_modifier(&self, depth: u32) -> f32 {
        1.0 + depth as f32 * self.depth_difficulty_multiplier
    }
}

/// Parameters of one dungeon generation call.
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    pub name: String,
    pub biome: Biome,
    pub difficulty: DifficultyTier,
    pub room_count: usize,
    pub seed: u64,
}

impl GenerationRequest {
    pub fn new(name: &str, biome: Biome, difficulty: DifficultyTier, room_count: usize, seed: u64) -> Self {
        Self {
            name: name.to_string(),
            biome,
            difficulty,
            room_count,
            seed,
        }
    }
}

/// Result of the single-room generation API.
#[derive(Clone, Debug)]
pub struct GeneratedRoom {
    pub room: Room,
    pub template_id: String,
    pub biome: Biome,
    /// Exit directions the room wants; the caller wires destinations
    pub desired_exits: BTreeSet<Direction>,
}

/// The seeded dungeon generator.
///
/// Holds read-only template catalogs and the coherence engine; every
/// `generate` call derives its own random streams from the request seed, so
/// concurrent calls never share mutable state.
pub struct DungeonGenerator<R, E>
where
    R: RoomTemplateProvider,
    E: EntityTemplateProvider,
{
    room_templates: R,
    entity_templates: E,
    coherence: CoherenceEngine,
    config: GeneratorConfig,
}

impl DungeonGenerator<BuiltinRoomTemplates, BuiltinEntityTemplates> {
    /// Generator over the built-in catalogs and default tunables.
    pub fn with_builtin() -> Self {
        Self::new(
            BuiltinRoomTemplates::new(),
            BuiltinEntityTemplates::new(),
            CoherenceEngine::with_builtin(),
            GeneratorConfig::default(),
        )
    }
}

impl<R, E> DungeonGenerator<R, E>
where
    R: RoomTemplateProvider,
    E: EntityTemplateProvider,
{
    pub fn new(
        room_templates: R,
        entity_templates: E,
        coherence: CoherenceEngine,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            room_templates,
            entity_templates,
            coherence,
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Threat multiplier for a depth, from the generator's tunables.
    pub fn depth_difficulty_modifier(&self, depth: u32) -> f32 {
        self.config.depth_difficulty_modifier(depth)
    }

    /// Build a complete dungeon.
    ///
    /// Deterministic: identical requests produce identical dungeons.
    pub fn generate(&self, request: &GenerationRequest) -> Result<Dungeon, GenerationError> {
        if request.name.trim().is_empty() {
            return Err(GenerationError::EmptyName);
        }
        if request.room_count < self.config.min_room_count {
            return Err(GenerationError::RoomCountOutOfRange {
                requested: request.room_count,
                minimum: self.config.min_room_count,
            });
        }

        let templates = self.room_templates.templates_by_biome(request.biome);
        if templates.is_empty() {
            return Err(GenerationError::NoTemplatesForBiome {
                biome: request.biome,
            });
        }

        let biome_tags = self.biome_tags(request.biome)?;

        let seeds = GenerationSeeds::from_master(request.seed);
        let mut layout_rng = ChaCha8Rng::seed_from_u64(seeds.layout);
        let mut exits_rng = ChaCha8Rng::seed_from_u64(seeds.exits);
        let mut naming_rng = ChaCha8Rng::seed_from_u64(seeds.naming);
        let mut population_rng = ChaCha8Rng::seed_from_u64(seeds.population);

        debug!(
            "generating dungeon '{}' ({} rooms, biome {}, tier {}, seed {})",
            request.name, request.room_count, request.biome, request.difficulty, request.seed
        );

        // Entrance: corridor or junction, never populated.
        let entrance_pool: Vec<&RoomTemplate> = templates
            .iter()
            .copied()
            .filter(|t| t.archetype.entrance_suitable())
            .collect();
        let entrance_template = pick_weighted(&entrance_pool, &mut layout_rng, |t| t.weight)
            .copied()
            .ok_or(GenerationError::NoEntranceTemplate {
                biome: request.biome,
            })?;

        let entrance_position = Position::default();
        let entrance = self.build_room(
            RoomId(0),
            entrance_template,
            entrance_position,
            &biome_tags,
            &mut naming_rng,
        );
        let mut dungeon = Dungeon::new(request.name.clone(), entrance);

        let mut placed: Vec<RoomId> = vec![RoomId(0)];
        let mut occupied: HashMap<Position, RoomId> = HashMap::new();
        occupied.insert(entrance_position, RoomId(0));
        let mut desired: HashMap<RoomId, BTreeSet<Direction>> = HashMap::new();
        desired.insert(
            RoomId(0),
            determine_exits(entrance_template, &self.config, &mut exits_rng, None),
        );

        // Boss arena is held back for the final growth slot.
        let growth_pool: Vec<&RoomTemplate> = templates
            .iter()
            .copied()
            .filter(|t| t.archetype != RoomArchetype::BossArena)
            .collect();
        let boss_pool: Vec<&RoomTemplate> = templates
            .iter()
            .copied()
            .filter(|t| t.archetype == RoomArchetype::BossArena)
            .collect();

        for index in 1..request.room_count {
            let is_final_slot = index == request.room_count - 1;
            let template = if is_final_slot && !boss_pool.is_empty() {
                pick_weighted(&boss_pool, &mut layout_rng, |t| t.weight)
            } else if !growth_pool.is_empty() {
                pick_weighted(&growth_pool, &mut layout_rng, |t| t.weight)
            } else {
                pick_weighted(&templates, &mut layout_rng, |t| t.weight)
            }
            .copied()
            .ok_or(GenerationError::NoTemplatesForBiome {
                biome: request.biome,
            })?;

            let (anchor_id, direction, position) =
                self.choose_attachment(&dungeon, &placed, &occupied, &desired, &mut layout_rng);

            let room_id = RoomId(index as u32);
            let mut room =
                self.build_room(room_id, template, position, &biome_tags, &mut naming_rng);
            room.add_exit(direction.opposite(), anchor_id);

            let mut wanted = determine_exits(
                template,
                &self.config,
                &mut exits_rng,
                Some(direction.opposite()),
            );
            wanted.remove(&direction.opposite());
            desired.insert(room_id, wanted);

            dungeon.add_room(room);
            if let Some(anchor) = dungeon.room_mut(anchor_id) {
                anchor.add_exit(direction, room_id);
            }
            desired
                .entry(anchor_id)
                .or_default()
                .remove(&direction);

            occupied.entry(position).or_insert(room_id);
            placed.push(room_id);
        }

        self.wire_loop_edges(&mut dungeon, &placed, &occupied, &desired);
        self.enforce_exit_floor(&mut dungeon, &placed);

        population::populate_dungeon(
            &mut dungeon,
            &self.entity_templates,
            request.difficulty,
            &self.config,
            &mut population_rng,
        );

        info!(
            "dungeon '{}' generated: {} rooms, entrance {}",
            dungeon.name(),
            dungeon.room_count(),
            dungeon.entrance()
        );
        Ok(dungeon)
    }

    /// Asynchronous variant of [`generate`](Self::generate) with identical
    /// semantics, for callers that offload generation onto their own
    /// task infrastructure.
    pub async fn generate_async(
        &self,
        request: &GenerationRequest,
    ) -> Result<Dungeon, GenerationError> {
        self.generate(request)
    }

    /// Generate a single room, deterministic per (position, biome, seed).
    ///
    /// The room's exits are not wired; `desired_exits` tells the caller
    /// which directions the room wants connected.
    pub fn generate_room(
        &self,
        position: Position,
        biome: Biome,
        seed: u64,
    ) -> Result<GeneratedRoom, GenerationError> {
        let templates = self.room_templates.templates_by_biome(biome);
        if templates.is_empty() {
            return Err(GenerationError::NoTemplatesForBiome { biome });
        }
        let biome_tags = self.biome_tags(biome)?;

        let seeds = GenerationSeeds::from_master(seed);
        let mut layout_rng = ChaCha8Rng::seed_from_u64(seeds.for_position(
            seeds.layout,
            position.x,
            position.y,
            position.z,
        ));
        let mut naming_rng = ChaCha8Rng::seed_from_u64(seeds.for_position(
            seeds.naming,
            position.x,
            position.y,
            position.z,
        ));
        let mut exits_rng = ChaCha8Rng::seed_from_u64(seeds.for_position(
            seeds.exits,
            position.x,
            position.y,
            position.z,
        ));

        let template = pick_weighted(&templates, &mut layout_rng, |t| t.weight)
            .copied()
            .ok_or(GenerationError::NoTemplatesForBiome { biome })?;

        let room = self.build_room(RoomId(0), template, position, &biome_tags, &mut naming_rng);
        let desired_exits = determine_exits(template, &self.config, &mut exits_rng, None);

        Ok(GeneratedRoom {
            room,
            template_id: template.id.clone(),
            biome,
            desired_exits,
        })
    }

    /// Tags every room of this biome starts with, derived through the
    /// coherence engine.
    fn biome_tags(&self, biome: Biome) -> Result<BTreeSet<String>, GenerationError> {
        let outcome = self
            .coherence
            .create_from_biome(biome.id(), &[])
            .map_err(|e| GenerationError::IncoherentEnvironment {
                biome,
                detail: e.to_string(),
            })?;
        Ok(outcome.context.tags().clone())
    }

    fn build_room(
        &self,
        id: RoomId,
        template: &RoomTemplate,
        position: Position,
        biome_tags: &BTreeSet<String>,
        naming_rng: &mut ChaCha8Rng,
    ) -> Room {
        let definition = self.coherence.biome(template.biome.id());
        let name = naming::room_name(template, naming_rng);
        let description = naming::fill_description(template, definition, naming_rng);
        let mut room = Room::new(id, name, template.archetype, template.biome, description, position);
        for tag in biome_tags {
            room.add_tag(tag);
        }
        for tag in &template.tags {
            room.add_tag(tag);
        }
        room
    }

    /// Pick the room and direction the next room attaches to.
    ///
    /// Prefers unfulfilled desired exits leading to vacant positions, then
    /// any free direction to a vacant position, and as a last resort any
    /// free direction at all.
    fn choose_attachment(
        &self,
        dungeon: &Dungeon,
        placed: &[RoomId],
        occupied: &HashMap<Position, RoomId>,
        desired: &HashMap<RoomId, BTreeSet<Direction>>,
        rng: &mut ChaCha8Rng,
    ) -> (RoomId, Direction, Position) {
        let mut preferred: Vec<(RoomId, Direction, Position)> = Vec::new();
        let mut vacant: Vec<(RoomId, Direction, Position)> = Vec::new();
        let mut any_free: Vec<(RoomId, Direction, Position)> = Vec::new();

        for &room_id in placed {
            let Some(room) = dungeon.room(room_id) else {
                continue;
            };
            for direction in Direction::all() {
                if room.has_exit(*direction) {
                    continue;
                }
                let target = room.position().step(*direction);
                let candidate = (room_id, *direction, target);
                let wants = desired
                    .get(&room_id)
                    .is_some_and(|set| set.contains(direction));
                if !occupied.contains_key(&target) {
                    if wants {
                        preferred.push(candidate);
                    }
                    vacant.push(candidate);
                } else {
                    any_free.push(candidate);
                }
            }
        }

        let pool = if !preferred.is_empty() {
            preferred
        } else if !vacant.is_empty() {
            vacant
        } else {
            any_free
        };

        // A placed room always has a free direction among six, so the pool
        // cannot be empty for the room counts the generator accepts.
        let weight = |c: &(RoomId, Direction, Position)| {
            (self.config.direction_probability(c.1) * 100.0) as u32 + 1
        };
        *pick_weighted(&pool, rng, weight).unwrap_or(&pool[0])
    }

    /// Connect unfulfilled desired exits to rooms that happen to sit in the
    /// neighboring position, forming loops.
    fn wire_loop_edges(
        &self,
        dungeon: &mut Dungeon,
        placed: &[RoomId],
        occupied: &HashMap<Position, RoomId>,
        desired: &HashMap<RoomId, BTreeSet<Direction>>,
    ) {
        for &room_id in placed {
            let Some(wanted) = desired.get(&room_id) else {
                continue;
            };
            for direction in wanted.clone() {
                let Some(room) = dungeon.room(room_id) else {
                    continue;
                };
                if room.has_exit(direction) {
                    continue;
                }
                let target = room.position().step(direction);
                let Some(&neighbor_id) = occupied.get(&target) else {
                    continue;
                };
                if neighbor_id == room_id {
                    continue;
                }
                let neighbor_free = dungeon
                    .room(neighbor_id)
                    .is_some_and(|n| !n.has_exit(direction.opposite()));
                if !neighbor_free {
                    continue;
                }
                if let Some(room) = dungeon.room_mut(room_id) {
                    room.add_exit(direction, neighbor_id);
                }
                if let Some(neighbor) = dungeon.room_mut(neighbor_id) {
                    neighbor.add_exit(direction.opposite(), room_id);
                }
            }
        }
    }

    /// Bring every room up to the configured exit floor by wiring extra
    /// bidirectional edges. The probability draws alone only guarantee the
    /// back edge, so a floor above one needs this final pass.
    fn enforce_exit_floor(&self, dungeon: &mut Dungeon, placed: &[RoomId]) {
        let minimum = self.config.min_exits_per_room;
        for &room_id in placed {
            while dungeon
                .room(room_id)
                .is_some_and(|r| r.exit_count() < minimum)
            {
                let Some((direction, neighbor_id)) = self.extra_link(dungeon, placed, room_id)
                else {
                    break;
                };
                if let Some(room) = dungeon.room_mut(room_id) {
                    room.add_exit(direction, neighbor_id);
                }
                if let Some(neighbor) = dungeon.room_mut(neighbor_id) {
                    neighbor.add_exit(direction.opposite(), room_id);
                }
            }
        }
    }

    /// A (direction, neighbor) pair usable as an extra edge for `room_id`:
    /// a free direction on this room paired with a room whose opposite slot
    /// is free, preferring the spatially adjacent neighbor and otherwise the
    /// nearest one. Deterministic: candidates are scanned in fixed direction
    /// and placement order, and only a strictly closer candidate displaces
    /// an earlier one.
    fn extra_link(
        &self,
        dungeon: &Dungeon,
        placed: &[RoomId],
        room_id: RoomId,
    ) -> Option<(Direction, RoomId)> {
        let room = dungeon.room(room_id)?;
        let position = room.position();
        let mut best: Option<(i32, Direction, RoomId)> = None;
        for direction in Direction::all() {
            if room.has_exit(*direction) {
                continue;
            }
            for &other_id in placed {
                if other_id == room_id {
                    continue;
                }
                let Some(other) = dungeon.room(other_id) else {
                    continue;
                };
                if other.has_exit(direction.opposite()) {
                    continue;
                }
                // One edge per room pair keeps the extra links spread out.
                if room.exits().values().any(|&id| id == other_id) {
                    continue;
                }
                let q = other.position();
                let distance = (position.x - q.x).abs()
                    + (position.y - q.y).abs()
                    + (position.z - q.z).abs();
                let score = if position.step(*direction) == q {
                    0
                } else {
                    distance
                };
                if best.map_or(true, |(s, _, _)| score < s) {
                    best = Some((score, *direction, other_id));
                }
            }
        }
        best.map(|(_, direction, neighbor)| (direction, neighbor))
    }
}
