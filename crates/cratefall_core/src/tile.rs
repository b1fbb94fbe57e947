//! Tile records as stored in level layers

use serde::{Deserialize, Serialize};

/// Default tile edge length in pixels
pub const DEFAULT_TILE_SIZE: u32 = 16;

/// How a tile is mirrored when drawn from the atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FlipCode {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl FlipCode {
    /// Whether the tile is mirrored along the X axis
    pub fn flip_x(self) -> bool {
        matches!(self, FlipCode::Horizontal | FlipCode::Both)
    }

    /// Whether the tile is mirrored along the Y axis
    pub fn flip_y(self) -> bool {
        matches!(self, FlipCode::Vertical | FlipCode::Both)
    }
}

impl TryFrom<u8> for FlipCode {
    type Error = InvalidFlipCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(FlipCode::None),
            1 => Ok(FlipCode::Horizontal),
            2 => Ok(FlipCode::Vertical),
            3 => Ok(FlipCode::Both),
            other => Err(InvalidFlipCode(other)),
        }
    }
}

impl From<FlipCode> for u8 {
    fn from(flip: FlipCode) -> Self {
        match flip {
            FlipCode::None => 0,
            FlipCode::Horizontal => 1,
            FlipCode::Vertical => 2,
            FlipCode::Both => 3,
        }
    }
}

/// A flip code outside `0..=3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid flip code {0}, expected 0..=3")]
pub struct InvalidFlipCode(pub u8);

/// A single placed tile
///
/// The source rectangle is `src` with the level's tile edge length as both
/// width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    /// Top-left corner of the tile in the atlas image
    pub src: [f32; 2],
    /// Top-left corner of the tile in world pixels
    #[serde(rename = "px")]
    pub position: [f32; 2],
    /// Mirroring applied when drawing
    #[serde(rename = "f", default)]
    pub flip: FlipCode,
}

impl TileRecord {
    pub fn new(src: [f32; 2], position: [f32; 2], flip: FlipCode) -> Self {
        Self {
            src,
            position,
            flip,
        }
    }
}
