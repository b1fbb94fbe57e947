//! Entity spawn records placed in the level

use serde::{Deserialize, Serialize};

/// The closed set of entity kinds a level can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Chest,
    CrateBig,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Player, EntityKind::Chest, EntityKind::CrateBig];

    /// Resolve an entity identifier as written in level data
    pub fn from_identifier(name: &str) -> Option<Self> {
        match name {
            "player" => Some(EntityKind::Player),
            "chest" => Some(EntityKind::Chest),
            "crate_big" => Some(EntityKind::CrateBig),
            _ => None,
        }
    }

    pub fn identifier(&self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Chest => "chest",
            EntityKind::CrateBig => "crate_big",
        }
    }
}

/// Initial world coordinates of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

impl SpawnPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn position(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}
