//! Error types for generation, coherence, and transitions
//!
//! Every failure is raised synchronously to the immediate caller and names
//! the offending parameter or rule. Nothing is retried internally: generation
//! is deterministic, so a retry with the same inputs cannot succeed.

use thiserror::Error;

use crate::environment::Biome;
use crate::realm::RealmId;

/// Errors from the dungeon and room generators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("dungeon name must not be empty")]
    EmptyName,

    #[error("room count must be at least {minimum}, got {requested}")]
    RoomCountOutOfRange { requested: usize, minimum: usize },

    #[error("no room templates available for biome '{biome}'")]
    NoTemplatesForBiome { biome: Biome },

    #[error("no entrance-suitable template (Corridor or Junction) for biome '{biome}'")]
    NoEntranceTemplate { biome: Biome },

    #[error("biome '{biome}' produced an incoherent environment: {detail}")]
    IncoherentEnvironment { biome: Biome, detail: String },
}

/// Errors from the environment coherence engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoherenceError {
    #[error("unknown biome '{biome_id}'")]
    UnknownBiome { biome_id: String },

    #[error("override for unknown category '{category_id}'")]
    UnknownCategory { category_id: String },

    #[error("unknown value '{value_id}' for category '{category_id}'")]
    UnknownValue { category_id: String, value_id: String },

    #[error("invalid combination: rule '{rule_id}' ({reason})")]
    InvalidCombination { rule_id: String, reason: String },

    #[error("exclusion rule '{rule_id}' references unknown category '{category_id}'")]
    RuleUnknownCategory { rule_id: String, category_id: String },

    #[error("exclusion rule '{rule_id}' references unknown value '{value_id}' of category '{category_id}'")]
    RuleUnknownValue {
        rule_id: String,
        category_id: String,
        value_id: String,
    },
}

/// Errors from the transition zone generator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("room count must be between 1 and 3, got {requested}")]
    RoomCountOutOfRange { requested: usize },

    #[error("no transition possible from {from} to {to}")]
    IncompatibleRealms { from: RealmId, to: RealmId },
}
