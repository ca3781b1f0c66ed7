//! Transition zones between realms
//!
//! A transition zone smooths travel between two realms by blending their
//! environmental properties. Single zones sit at the halfway point; a
//! sequence of zones spreads evenly across the gap, so three zones blend at
//! 0.25, 0.50 and 0.75.

use log::debug;

use crate::error::TransitionError;
use crate::realm::{
    BuiltinRealmAdjacency, BuiltinRealmProperties, RealmBiomeProperties, RealmCompatibility,
    RealmCompatibilityClassifier, RealmId, RealmPropertyStore,
};

/// Bounds on the number of zones in a generated sequence.
pub const MIN_SEQUENCE_ROOMS: usize = 1;
pub const MAX_SEQUENCE_ROOMS: usize = 3;

/// One blended zone between two realms.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionZone {
    pub from: RealmId,
    pub to: RealmId,
    /// Position within the generated sequence, starting at 0
    pub sequence_index: usize,
    /// 0.0 is pure `from`, 1.0 is pure `to`
    pub blend_factor: f32,
    pub properties: RealmBiomeProperties,
    pub theme: String,
}

/// Generates transition zones from a compatibility classifier and a realm
/// property store.
pub struct TransitionGenerator<C, S> {
    classifier: C,
    store: S,
}

impl TransitionGenerator<BuiltinRealmAdjacency, BuiltinRealmProperties> {
    /// Generator over the built-in nine-realm tables.
    pub fn with_builtin() -> Self {
        Self::new(BuiltinRealmAdjacency, BuiltinRealmProperties)
    }
}

impl<C, S> TransitionGenerator<C, S>
where
    C: RealmCompatibilityClassifier,
    S: RealmPropertyStore,
{
    pub fn new(classifier: C, store: S) -> Self {
        Self { classifier, store }
    }

    /// Whether a transition between the two realms can exist at all.
    ///
    /// Identical realms need no transition, and incompatible pairs admit
    /// none.
    pub fn can_generate(&self, from: RealmId, to: RealmId) -> bool {
        from != to && self.classifier.classify(from, to) != RealmCompatibility::Incompatible
    }

    /// Generate a single zone at the halfway blend, or `None` when no
    /// transition is possible.
    pub fn generate(&self, from: RealmId, to: RealmId) -> Option<TransitionZone> {
        if !self.can_generate(from, to) {
            debug!("no transition possible from {} to {}", from, to);
            return None;
        }
        Some(self.zone(from, to, 0, 0.5))
    }

    /// Generate an evenly spaced sequence of `room_count` zones.
    ///
    /// `room_count` must lie in `[MIN_SEQUENCE_ROOMS, MAX_SEQUENCE_ROOMS]`.
    /// Zone `i` of `n` blends at `(i + 1) / (n + 1)`, keeping both endpoints
    /// outside the sequence.
    pub fn generate_sequence(
        &self,
        from: RealmId,
        to: RealmId,
        room_count: usize,
    ) -> Result<Vec<TransitionZone>, TransitionError> {
        if !(MIN_SEQUENCE_ROOMS..=MAX_SEQUENCE_ROOMS).contains(&room_count) {
            return Err(TransitionError::RoomCountOutOfRange {
                requested: room_count,
            });
        }
        if !self.can_generate(from, to) {
            return Err(TransitionError::IncompatibleRealms { from, to });
        }

        let zones = (0..room_count)
            .map(|index| {
                let blend = (index + 1) as f32 / (room_count + 1) as f32;
                self.zone(from, to, index, blend)
            })
            .collect();
        Ok(zones)
    }

    /// Blended properties between the two realms' baselines.
    pub fn interpolate(&self, from: RealmId, to: RealmId, blend_factor: f32) -> RealmBiomeProperties {
        RealmBiomeProperties::interpolate(
            &self.store.properties(from),
            &self.store.properties(to),
            blend_factor,
        )
    }

    fn zone(&self, from: RealmId, to: RealmId, index: usize, blend: f32) -> TransitionZone {
        let theme = if blend < 0.5 {
            format!(
                "The {} still dominate, but {} press in at the edges.",
                from.theme_fragment(),
                to.theme_fragment()
            )
        } else {
            format!(
                "The {} have faded; {} take hold.",
                from.theme_fragment(),
                to.theme_fragment()
            )
        };
        TransitionZone {
            from,
            to,
            sequence_index: index,
            blend_factor: blend,
            properties: self.interpolate(from, to, blend),
            theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> TransitionGenerator<BuiltinRealmAdjacency, BuiltinRealmProperties> {
        TransitionGenerator::with_builtin()
    }

    #[test]
    fn test_single_zone_blends_at_midpoint() {
        let zone = generator()
            .generate(RealmId::Midgard, RealmId::Vanaheim)
            .unwrap();
        assert_eq!(zone.blend_factor, 0.5);
        assert_eq!(zone.properties.temperature_celsius, 23); // midpoint of 18 and 28
    }

    #[test]
    fn test_identical_realms_need_no_transition() {
        let generator = generator();
        assert!(!generator.can_generate(RealmId::Asgard, RealmId::Asgard));
        assert!(generator.generate(RealmId::Asgard, RealmId::Asgard).is_none());
    }

    #[test]
    fn test_incompatible_pair_is_refused() {
        let generator = generator();
        assert!(!generator.can_generate(RealmId::Muspelheim, RealmId::Niflheim));
        assert!(generator
            .generate(RealmId::Muspelheim, RealmId::Niflheim)
            .is_none());
        assert_eq!(
            generator.generate_sequence(RealmId::Muspelheim, RealmId::Niflheim, 2),
            Err(TransitionError::IncompatibleRealms {
                from: RealmId::Muspelheim,
                to: RealmId::Niflheim,
            })
        );
    }

    #[test]
    fn test_sequence_blend_factors_are_evenly_spaced() {
        let zones = generator()
            .generate_sequence(RealmId::Midgard, RealmId::Jotunheim, 3)
            .unwrap();
        let blends: Vec<f32> = zones.iter().map(|z| z.blend_factor).collect();
        assert_eq!(blends, vec![0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_sequence_indices_and_endpoints() {
        let zones = generator()
            .generate_sequence(RealmId::Midgard, RealmId::Svartalfheim, 2)
            .unwrap();
        assert_eq!(zones.len(), 2);
        for (i, zone) in zones.iter().enumerate() {
            assert_eq!(zone.sequence_index, i);
            assert!(zone.blend_factor > 0.0 && zone.blend_factor < 1.0);
            assert_eq!(zone.from, RealmId::Midgard);
            assert_eq!(zone.to, RealmId::Svartalfheim);
        }
    }

    #[test]
    fn test_sequence_length_is_bounded() {
        let generator = generator();
        for bad in [0usize, 4, 10] {
            assert_eq!(
                generator.generate_sequence(RealmId::Midgard, RealmId::Asgard, bad),
                Err(TransitionError::RoomCountOutOfRange { requested: bad })
            );
        }
        for good in MIN_SEQUENCE_ROOMS..=MAX_SEQUENCE_ROOMS {
            let zones = generator
                .generate_sequence(RealmId::Midgard, RealmId::Asgard, good)
                .unwrap();
            assert_eq!(zones.len(), good);
        }
    }

    #[test]
    fn test_properties_progress_monotonically() {
        let zones = generator()
            .generate_sequence(RealmId::Midgard, RealmId::Muspelheim, 3)
            .unwrap();
        // Midgard is cooler than Muspelheim, so each zone should be warmer
        // than the last.
        for pair in zones.windows(2) {
            assert!(
                pair[1].properties.temperature_celsius > pair[0].properties.temperature_celsius
            );
        }
    }

    #[test]
    fn test_theme_mentions_both_realms() {
        let zone = generator()
            .generate(RealmId::Niflheim, RealmId::Helheim)
            .unwrap();
        assert!(zone.theme.contains(RealmId::Niflheim.theme_fragment()));
        assert!(zone.theme.contains(RealmId::Helheim.theme_fragment()));
    }

    #[test]
    fn test_compatible_pairs_still_allow_transitions() {
        // Compatible means a transition is unnecessary, not impossible.
        let generator = generator();
        assert!(generator.can_generate(RealmId::Vanaheim, RealmId::Alfheim));
        assert!(generator
            .generate(RealmId::Vanaheim, RealmId::Alfheim)
            .is_some());
    }
}
