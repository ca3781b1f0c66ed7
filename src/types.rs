//! Shared types for dungeon generation
//!
//! Contains common IDs, positions, directions, and difficulty tiers used
//! across the generator and environment modules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a room within a dungeon
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Room#{}", self.0)
    }
}

/// Grid position of a room in the dungeon.
///
/// `z` grows downward: depth 0 is the entrance level, positive `z` is deeper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Depth of this position (entrance level is 0).
    pub fn depth(&self) -> u32 {
        self.z.max(0) as u32
    }

    /// Position reached by stepping one unit in the given direction.
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy, dz) = direction.offset();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, z={})", self.x, self.y, self.z)
    }
}

/// Compass and vertical directions connecting rooms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Direction {
    pub fn all() -> &'static [Direction] {
        &[
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Up,
            Direction::Down,
        ]
    }

    /// The direction leading back the way you came.
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Grid offset of one step in this direction.
    pub fn offset(&self) -> (i32, i32, i32) {
        match self {
            Direction::North => (0, -1, 0),
            Direction::South => (0, 1, 0),
            Direction::East => (1, 0, 0),
            Direction::West => (-1, 0, 0),
            Direction::Up => (0, 0, -1),
            Direction::Down => (0, 0, 1),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Difficulty tier requested for a generated dungeon
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum DifficultyTier {
    Easy,
    #[default]
    Normal,
    Hard,
    Nightmare,
}

impl DifficultyTier {
    pub fn all() -> &'static [DifficultyTier] {
        &[
            DifficultyTier::Easy,
            DifficultyTier::Normal,
            DifficultyTier::Hard,
            DifficultyTier::Nightmare,
        ]
    }

    /// Base threat budget per room at depth 0, before the depth modifier.
    pub fn base_threat_budget(&self) -> u32 {
        match self {
            DifficultyTier::Easy => 4,
            DifficultyTier::Normal => 7,
            DifficultyTier::Hard => 11,
            DifficultyTier::Nightmare => 16,
        }
    }

    /// Chance that a populated room spends budget on an elite-or-better pick.
    pub fn elite_bias(&self) -> f64 {
        match self {
            DifficultyTier::Easy => 0.05,
            DifficultyTier::Normal => 0.15,
            DifficultyTier::Hard => 0.30,
            DifficultyTier::Nightmare => 0.50,
        }
    }

    /// Chance that any given non-entrance room is populated at all.
    pub fn population_chance(&self) -> f64 {
        match self {
            DifficultyTier::Easy => 0.45,
            DifficultyTier::Normal => 0.60,
            DifficultyTier::Hard => 0.75,
            DifficultyTier::Nightmare => 0.85,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "Easy",
            DifficultyTier::Normal => "Normal",
            DifficultyTier::Hard => "Hard",
            DifficultyTier::Nightmare => "Nightmare",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposites_are_symmetric() {
        for dir in Direction::all() {
            assert_eq!(dir.opposite().opposite(), *dir);
        }
    }

    #[test]
    fn test_direction_offsets_cancel() {
        for dir in Direction::all() {
            let (dx, dy, dz) = dir.offset();
            let (ox, oy, oz) = dir.opposite().offset();
            assert_eq!((dx + ox, dy + oy, dz + oz), (0, 0, 0));
        }
    }

    #[test]
    fn test_position_step_and_depth() {
        let origin = Position::default();
        let below = origin.step(Direction::Down);
        assert_eq!(below.z, 1);
        assert_eq!(below.depth(), 1);
        assert_eq!(origin.depth(), 0);
        assert_eq!(below.step(Direction::Up), origin);
    }

    #[test]
    fn test_tier_budgets_increase() {
        let tiers = DifficultyTier::all();
        for pair in tiers.windows(2) {
            assert!(pair[0].base_threat_budget() < pair[1].base_threat_budget());
            assert!(pair[0].elite_bias() < pair[1].elite_bias());
        }
    }
}
