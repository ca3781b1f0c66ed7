//! Environment category model and coherence engine
//!
//! Categorical attributes (biome, climate, lighting, era, condition), the
//! pairwise exclusion rules between their values, and the engine that
//! validates contexts and derives tag sets from biome defaults.

pub mod biomes;
pub mod categories;
pub mod coherence;
pub mod config;
pub mod context;
pub mod rules;

pub use biomes::{Biome, BiomeDefinition};
pub use categories::{CategoryValue, EnvironmentCategory};
pub use coherence::{CoherenceEngine, ContextBuildOutcome};
pub use config::EnvironmentConfig;
pub use context::{EnvironmentContext, ValidationResult, Violation};
pub use rules::{CategoryExclusionRule, RuleSeverity, RuleSide};
