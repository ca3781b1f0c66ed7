//! Realms and their baseline environmental properties
//!
//! Realms are top-level world regions, coarser than the biomes used inside
//! dungeon generation. Each carries a numeric property tuple used by the
//! transition zone generator, and an adjacency classification that decides
//! whether travel between two realms is direct, smoothed, or impossible.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The nine realms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RealmId {
    Midgard,
    Asgard,
    Vanaheim,
    Alfheim,
    Jotunheim,
    Svartalfheim,
    Muspelheim,
    Niflheim,
    Helheim,
}

impl RealmId {
    pub fn all() -> &'static [RealmId] {
        &[
            RealmId::Midgard,
            RealmId::Asgard,
            RealmId::Vanaheim,
            RealmId::Alfheim,
            RealmId::Jotunheim,
            RealmId::Svartalfheim,
            RealmId::Muspelheim,
            RealmId::Niflheim,
            RealmId::Helheim,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            RealmId::Midgard => "Midgard",
            RealmId::Asgard => "Asgard",
            RealmId::Vanaheim => "Vanaheim",
            RealmId::Alfheim => "Alfheim",
            RealmId::Jotunheim => "Jotunheim",
            RealmId::Svartalfheim => "Svartalfheim",
            RealmId::Muspelheim => "Muspelheim",
            RealmId::Niflheim => "Niflheim",
            RealmId::Helheim => "Helheim",
        }
    }

    /// Descriptive fragment used when composing transition themes.
    pub fn theme_fragment(&self) -> &'static str {
        match self {
            RealmId::Midgard => "rain-dark human lands",
            RealmId::Asgard => "shattered spires humming with static",
            RealmId::Vanaheim => "overgrown terraces heavy with pollen",
            RealmId::Alfheim => "light that falls from no sun",
            RealmId::Jotunheim => "cyclopean ice-carved ranges",
            RealmId::Svartalfheim => "soot-black galleries of the forge clans",
            RealmId::Muspelheim => "ashfall and rivers of fire",
            RealmId::Niflheim => "mist banks over ancient ice",
            RealmId::Helheim => "gray shores where nothing decays",
        }
    }
}

impl fmt::Display for RealmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Baseline environmental numbers for a realm.
///
/// Temperature and humidity are integral in this domain; the float fields
/// are normalized factors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RealmBiomeProperties {
    pub temperature_celsius: i32,
    /// 0.0 (dead) to 1.0 (saturated)
    pub aetheric_intensity: f32,
    pub humidity_percent: i32,
    /// 0.0 (lightless) to 1.0 (full light)
    pub light_level: f32,
    /// Spatial scale relative to Midgard
    pub scale_factor: f32,
    pub corrosion_rate: f32,
}

impl RealmBiomeProperties {
    pub fn new(
        temperature_celsius: i32,
        aetheric_intensity: f32,
        humidity_percent: i32,
        light_level: f32,
        scale_factor: f32,
        corrosion_rate: f32,
    ) -> Self {
        Self {
            temperature_celsius,
            aetheric_intensity,
            humidity_percent,
            light_level,
            scale_factor,
            corrosion_rate,
        }
    }

    /// Linear interpolation of every field independently.
    ///
    /// Integral fields blend in `f32` and round half away from zero, so a
    /// midpoint of 18 and 28 is exactly 23.
    pub fn interpolate(from: &Self, to: &Self, blend_factor: f32) -> Self {
        let lerp = |a: f32, b: f32| a * (1.0 - blend_factor) + b * blend_factor;
        let lerp_int = |a: i32, b: i32| lerp(a as f32, b as f32).round() as i32;
        Self {
            temperature_celsius: lerp_int(from.temperature_celsius, to.temperature_celsius),
            aetheric_intensity: lerp(from.aetheric_intensity, to.aetheric_intensity),
            humidity_percent: lerp_int(from.humidity_percent, to.humidity_percent),
            light_level: lerp(from.light_level, to.light_level),
            scale_factor: lerp(from.scale_factor, to.scale_factor),
            corrosion_rate: lerp(from.corrosion_rate, to.corrosion_rate),
        }
    }
}

/// Verdict on travel between an ordered realm pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RealmCompatibility {
    /// Travel works without smoothing
    Compatible,
    /// Travel works through generated transition zones
    RequiresTransition,
    /// No transition can bridge these realms
    Incompatible,
}

/// Classifies compatibility for an ordered realm pair.
pub trait RealmCompatibilityClassifier {
    fn classify(&self, from: RealmId, to: RealmId) -> RealmCompatibility;
}

/// Supplies baseline properties per realm.
pub trait RealmPropertyStore {
    fn properties(&self, realm: RealmId) -> RealmBiomeProperties;
}

/// Built-in adjacency table over the nine realms.
pub struct BuiltinRealmAdjacency;

impl RealmCompatibilityClassifier for BuiltinRealmAdjacency {
    fn classify(&self, from: RealmId, to: RealmId) -> RealmCompatibility {
        use RealmCompatibility::*;
        use RealmId::*;

        // Order does not matter for the builtin table.
        let pair = if from <= to { (from, to) } else { (to, from) };
        match pair {
            // Primal opposites: no gradient bridges fire and primal ice.
            (Muspelheim, Niflheim) => Incompatible,
            // The living summit and the realm of the dead do not touch.
            (Asgard, Helheim) => Incompatible,
            // Branches that sit close on the tree.
            (Vanaheim, Alfheim) => Compatible,
            (Asgard, Alfheim) => Compatible,
            (Svartalfheim, Jotunheim) => Compatible,
            (Niflheim, Helheim) => Compatible,
            _ => RequiresTransition,
        }
    }
}

/// Built-in per-realm property table.
pub struct BuiltinRealmProperties;

impl RealmPropertyStore for BuiltinRealmProperties {
    fn properties(&self, realm: RealmId) -> RealmBiomeProperties {
        match realm {
            RealmId::Midgard => RealmBiomeProperties::new(18, 0.3, 55, 0.6, 1.0, 0.4),
            RealmId::Asgard => RealmBiomeProperties::new(15, 1.0, 20, 0.8, 1.0, 0.0),
            RealmId::Vanaheim => RealmBiomeProperties::new(28, 0.8, 70, 0.7, 1.0, 0.2),
            RealmId::Alfheim => RealmBiomeProperties::new(22, 0.9, 45, 1.0, 0.9, 0.1),
            RealmId::Jotunheim => RealmBiomeProperties::new(-10, 0.5, 40, 0.5, 1.4, 0.3),
            RealmId::Svartalfheim => RealmBiomeProperties::new(12, 0.6, 30, 0.1, 0.8, 0.5),
            RealmId::Muspelheim => RealmBiomeProperties::new(58, 0.7, 10, 0.9, 1.2, 0.8),
            RealmId::Niflheim => RealmBiomeProperties::new(-25, 0.6, 85, 0.2, 1.0, 0.6),
            RealmId::Helheim => RealmBiomeProperties::new(-5, 0.8, 60, 0.1, 1.0, 0.7),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolation_midpoint_temperature() {
        let a = BuiltinRealmProperties.properties(RealmId::Midgard);
        let b = BuiltinRealmProperties.properties(RealmId::Vanaheim);
        let mid = RealmBiomeProperties::interpolate(&a, &b, 0.5);
        assert_eq!(mid.temperature_celsius, 23); // (18 + 28) / 2
    }

    #[test]
    fn test_interpolation_every_field_is_independent() {
        let a = RealmBiomeProperties::new(0, 0.0, 0, 0.0, 1.0, 0.0);
        let b = RealmBiomeProperties::new(100, 1.0, 50, 0.5, 3.0, 0.8);
        let quarter = RealmBiomeProperties::interpolate(&a, &b, 0.25);
        assert_eq!(quarter.temperature_celsius, 25);
        assert!((quarter.aetheric_intensity - 0.25).abs() < 1e-6);
        assert_eq!(quarter.humidity_percent, 13); // 12.5 rounds up
        assert!((quarter.light_level - 0.125).abs() < 1e-6);
        assert!((quarter.scale_factor - 1.5).abs() < 1e-6);
        assert!((quarter.corrosion_rate - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_interpolation_endpoints() {
        let a = BuiltinRealmProperties.properties(RealmId::Jotunheim);
        let b = BuiltinRealmProperties.properties(RealmId::Muspelheim);
        assert_eq!(RealmBiomeProperties::interpolate(&a, &b, 0.0), a);
        assert_eq!(RealmBiomeProperties::interpolate(&a, &b, 1.0), b);
    }

    #[test]
    fn test_asgard_canonical_properties() {
        let asgard = BuiltinRealmProperties.properties(RealmId::Asgard);
        assert_eq!(asgard.temperature_celsius, 15);
        assert_eq!(asgard.aetheric_intensity, 1.0);
        assert_eq!(asgard.humidity_percent, 20);
        assert_eq!(asgard.light_level, 0.8);
        assert_eq!(asgard.scale_factor, 1.0);
        assert_eq!(asgard.corrosion_rate, 0.0);
    }

    #[test]
    fn test_adjacency_is_symmetric_in_builtin_table() {
        for &from in RealmId::all() {
            for &to in RealmId::all() {
                assert_eq!(
                    BuiltinRealmAdjacency.classify(from, to),
                    BuiltinRealmAdjacency.classify(to, from),
                );
            }
        }
    }

    #[test]
    fn test_fire_and_primal_ice_are_incompatible() {
        assert_eq!(
            BuiltinRealmAdjacency.classify(RealmId::Muspelheim, RealmId::Niflheim),
            RealmCompatibility::Incompatible
        );
    }
}
