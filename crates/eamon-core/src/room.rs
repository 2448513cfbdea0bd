use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::RoomId;

/// Compass direction for room exits and movement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
    /// Up.
    Up,
    /// Down.
    Down,
}

impl Direction {
    /// All directions in canonical order.
    pub const ALL: [Direction; 6] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::Up,
        Self::Down,
    ];

    /// Parse a direction from its full name or one-letter abbreviation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "s" | "south" => Some(Self::South),
            "e" | "east" => Some(Self::East),
            "w" | "west" => Some(Self::West),
            "u" | "up" => Some(Self::Up),
            "d" | "down" => Some(Self::Down),
            _ => None,
        }
    }

    /// The full lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// The one-letter abbreviation.
    pub fn abbreviation(&self) -> &'static str {
        &self.name()[..1]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A one-way passage out of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomExit {
    /// The direction the player types to take this exit.
    pub direction: Direction,
    /// Where the exit leads.
    pub room_to: RoomId,
}

/// A location in the adventure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Room {
    /// Room id, unique within the adventure.
    pub id: RoomId,
    /// Short name shown on entry.
    pub name: String,
    /// Long description shown on the first visit and on `look`.
    pub description: String,
    /// Exits in declaration order.
    pub exits: Vec<RoomExit>,
    /// How many times the player has entered this room.
    #[serde(skip)]
    pub times_visited: u32,
}

impl Room {
    /// Create a room with no exits.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: RoomId(id),
            name: name.into(),
            description: String::new(),
            exits: Vec::new(),
            times_visited: 0,
        }
    }

    /// Builder: set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: add an exit.
    pub fn with_exit(mut self, direction: Direction, room_to: u32) -> Self {
        self.exits.push(RoomExit {
            direction,
            room_to: RoomId(room_to),
        });
        self
    }

    /// The exit leading in the given direction, if any.
    pub fn exit(&self, direction: Direction) -> Option<&RoomExit> {
        self.exits.iter().find(|e| e.direction == direction)
    }
}
