//! Rooms and the dungeon graph
//!
//! A dungeon owns its rooms in a flat arena keyed by `RoomId`; exits are
//! id-to-id edges, so the graph carries no pointer cycles. Rooms mutate only
//! while the owning generation run is wiring them together.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::environment::Biome;
use crate::templates::RoomArchetype;
use crate::types::{Direction, Position, RoomId};

/// One generated room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    name: String,
    archetype: RoomArchetype,
    biome: Biome,
    description: String,
    position: Position,
    exits: BTreeMap<Direction, RoomId>,
    tags: BTreeSet<String>,
    /// Entity template ids of the monsters placed here
    monsters: Vec<String>,
}

impl Room {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RoomId,
        name: String,
        archetype: RoomArchetype,
        biome: Biome,
        description: String,
        position: Position,
    ) -> Self {
        Self {
            id,
            name,
            archetype,
            biome,
            description,
            position,
            exits: BTreeMap::new(),
            tags: BTreeSet::new(),
            monsters: Vec::new(),
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn archetype(&self) -> RoomArchetype {
        self.archetype
    }

    pub fn biome(&self) -> Biome {
        self.biome
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Exit edges, direction to destination room.
    pub fn exits(&self) -> &BTreeMap<Direction, RoomId> {
        &self.exits
    }

    pub fn exit(&self, direction: Direction) -> Option<RoomId> {
        self.exits.get(&direction).copied()
    }

    pub fn exit_count(&self) -> usize {
        self.exits.len()
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn monsters(&self) -> &[String] {
        &self.monsters
    }

    pub fn has_monsters(&self) -> bool {
        !self.monsters.is_empty()
    }

    pub(crate) fn add_exit(&mut self, direction: Direction, destination: RoomId) {
        self.exits.insert(direction, destination);
    }

    pub(crate) fn has_exit(&self, direction: Direction) -> bool {
        self.exits.contains_key(&direction)
    }

    pub(crate) fn add_tag(&mut self, tag: &str) {
        self.tags.insert(tag.to_string());
    }

    pub(crate) fn add_monster(&mut self, template_id: &str) {
        self.monsters.push(template_id.to_string());
    }
}

/// A generated dungeon: the room arena plus the designated entrance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    name: String,
    rooms: HashMap<RoomId, Room>,
    entrance: RoomId,
}

impl Dungeon {
    pub(crate) fn new(name: String, entrance_room: Room) -> Self {
        let entrance = entrance_room.id();
        let mut rooms = HashMap::new();
        rooms.insert(entrance, entrance_room);
        Self {
            name,
            rooms,
            entrance,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entrance(&self) -> RoomId {
        self.entrance
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Whether every room can be reached from the entrance.
    pub fn is_fully_connected(&self) -> bool {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([self.entrance]);
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(room) = self.rooms.get(&id) {
                queue.extend(room.exits().values().copied());
            }
        }
        seen.len() == self.rooms.len()
    }

    pub(crate) fn add_room(&mut self, room: Room) {
        self.rooms.insert(room.id(), room);
    }

    pub(crate) fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: u32) -> Room {
        Room::new(
            RoomId(id),
            format!("Room {}", id),
            RoomArchetype::Chamber,
            Biome::Dungeon,
            "A bare test chamber.".to_string(),
            Position::default(),
        )
    }

    #[test]
    fn test_exits_are_id_edges() {
        let mut a = room(0);
        a.add_exit(Direction::North, RoomId(1));
        assert_eq!(a.exit(Direction::North), Some(RoomId(1)));
        assert_eq!(a.exit(Direction::South), None);
        assert_eq!(a.exit_count(), 1);
    }

    #[test]
    fn test_connectivity_detects_orphan() {
        let mut dungeon = Dungeon::new("Test".to_string(), room(0));
        let mut second = room(1);
        second.add_exit(Direction::South, RoomId(0));
        dungeon.add_room(second);
        // Entrance has no edge out, so room 1 is unreachable.
        assert!(!dungeon.is_fully_connected());

        dungeon
            .room_mut(RoomId(0))
            .unwrap()
            .add_exit(Direction::North, RoomId(1));
        assert!(dungeon.is_fully_connected());
    }

    #[test]
    fn test_monster_flag_follows_list() {
        let mut r = room(2);
        assert!(!r.has_monsters());
        r.add_monster("skeleton_thrall");
        assert!(r.has_monsters());
        assert_eq!(r.monsters(), &["skeleton_thrall".to_string()]);
    }
}
