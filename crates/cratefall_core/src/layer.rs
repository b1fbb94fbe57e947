//! Tile layers

use crate::TileRecord;
use serde::{Deserialize, Serialize};

/// The closed set of tile layers a level can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Background,
    Collision,
    LanternChain,
    Lantern,
    Spike,
}

impl LayerKind {
    /// Layers in back-to-front draw order
    pub const DRAW_ORDER: [LayerKind; 5] = [
        LayerKind::Background,
        LayerKind::Collision,
        LayerKind::LanternChain,
        LayerKind::Lantern,
        LayerKind::Spike,
    ];

    /// Resolve a layer identifier as written in level data
    pub fn from_identifier(name: &str) -> Option<Self> {
        match name {
            "bg" => Some(LayerKind::Background),
            "col" => Some(LayerKind::Collision),
            "lantern_data" => Some(LayerKind::LanternChain),
            "lantern" => Some(LayerKind::Lantern),
            "spike" => Some(LayerKind::Spike),
            _ => None,
        }
    }

    /// The identifier used in level data
    pub fn identifier(&self) -> &'static str {
        match self {
            LayerKind::Background => "bg",
            LayerKind::Collision => "col",
            LayerKind::LanternChain => "lantern_data",
            LayerKind::Lantern => "lantern",
            LayerKind::Spike => "spike",
        }
    }
}

/// An immutable, ordered collection of tiles sharing one role
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    kind: LayerKind,
    tiles: Vec<TileRecord>,
}

impl Layer {
    pub fn new(kind: LayerKind, tiles: Vec<TileRecord>) -> Self {
        Self { kind, tiles }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Tiles in authored order
    pub fn tiles(&self) -> &[TileRecord] {
        &self.tiles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TileRecord> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl<'a> IntoIterator for &'a Layer {
    type Item = &'a TileRecord;
    type IntoIter = std::slice::Iter<'a, TileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
