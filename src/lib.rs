//! Seeded dungeon generation library
//!
//! Procedural generation of connected room graphs with coherent
//! environmental theming. Three cooperating pieces:
//!
//! - [`CoherenceEngine`] validates category selections against exclusion
//!   rules and builds environment contexts from biome definitions
//! - [`DungeonGenerator`] grows a connected, seeded room graph from weighted
//!   templates and populates it with monsters by threat budget
//! - [`TransitionGenerator`] blends realm properties into transition zones
//!
//! All randomness flows from an explicit master seed, so every output is
//! reproducible.

pub mod dungeon;
pub mod environment;
pub mod error;
pub mod generator;
pub mod realm;
pub mod seeds;
pub mod templates;
pub mod transition;
pub mod types;
pub mod weighted;

pub use dungeon::{Dungeon, Room};
pub use environment::{
    Biome, BiomeDefinition, CategoryExclusionRule, CategoryValue, CoherenceEngine,
    ContextBuildOutcome, EnvironmentCategory, EnvironmentConfig, EnvironmentContext, RuleSeverity,
    RuleSide, ValidationResult, Violation,
};
pub use error::{CoherenceError, GenerationError, TransitionError};
pub use generator::{
    DungeonGenerator, GeneratedRoom, GenerationRequest, GeneratorConfig, biome_for_depth,
};
pub use realm::{
    RealmBiomeProperties, RealmCompatibility, RealmCompatibilityClassifier, RealmId,
    RealmPropertyStore,
};
pub use seeds::GenerationSeeds;
pub use templates::{
    BuiltinEntityTemplates, BuiltinRoomTemplates, EntityTemplate, EntityTemplateProvider,
    EntityTier, RoomArchetype, RoomTemplate, RoomTemplateProvider,
};
pub use transition::{TransitionGenerator, TransitionZone};
pub use types::{DifficultyTier, Direction, Position, RoomId};
