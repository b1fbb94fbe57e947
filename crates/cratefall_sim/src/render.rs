//! Render frame: everything a front end needs to draw one tick
//!
//! Nothing here touches a graphics API. The frame lists rectangles in draw
//! order and the front end maps them onto its own sprites.

use crate::arena::CrateHandle;
use crate::camera::CameraTracker;
use crate::debug::DebugOverlay;
use crate::geometry::Aabb;
use crate::player::{Animation, Facing, PlayerCharacter};
use bevy_math::Vec2;
use cratefall_core::{LayerKind, Level};

/// Backdrop color behind every level except the first
pub const BACKDROP_COLOR: [u8; 4] = [35, 30, 46, 255];

/// What fills the screen behind the tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    /// The sky image
    Sky,
    Solid([u8; 4]),
}

impl Backdrop {
    pub fn for_level(index: usize) -> Self {
        if index == 0 {
            Backdrop::Sky
        } else {
            Backdrop::Solid(BACKDROP_COLOR)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDraw {
    pub layer: LayerKind,
    /// Rectangle in the tile atlas
    pub src: Aabb,
    /// Rectangle in world space
    pub dst: Aabb,
    pub flip_x: bool,
    pub flip_y: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrateDraw {
    pub handle: CrateHandle,
    pub bounds: Aabb,
    pub atlas_src: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerDraw {
    pub bounds: Aabb,
    pub character: PlayerCharacter,
    pub facing: Facing,
    pub animation: Animation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub target: Vec2,
    pub offset: Vec2,
    pub zoom: f32,
    pub rotation: f32,
    pub viewport: Vec2,
}

impl From<&CameraTracker> for CameraView {
    fn from(camera: &CameraTracker) -> Self {
        Self {
            target: camera.target,
            offset: camera.offset,
            zoom: camera.zoom,
            rotation: camera.rotation,
            viewport: camera.viewport(),
        }
    }
}

impl CameraView {
    pub fn origin(&self) -> Vec2 {
        self.target - self.offset
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub level_index: usize,
    pub backdrop: Backdrop,
    pub camera: CameraView,
    /// Tiles in draw order
    pub tiles: Vec<TileDraw>,
    pub crates: Vec<CrateDraw>,
    pub player: PlayerDraw,
    pub overlay: Option<DebugOverlay>,
}

/// Tile draws for a level, layer by layer in fixed order
///
/// Within a layer the last record is drawn first, so earlier records end up
/// on top where tiles overlap.
pub fn tile_draws(level: &Level) -> Vec<TileDraw> {
    let size = level.tile_size() as f32;
    LayerKind::DRAW_ORDER
        .iter()
        .flat_map(|&kind| {
            level.tiles(kind).iter().rev().map(move |tile| TileDraw {
                layer: kind,
                src: Aabb::new(tile.src[0], tile.src[1], size, size),
                dst: Aabb::new(tile.position[0], tile.position[1], size, size),
                flip_x: tile.flip.flip_x(),
                flip_y: tile.flip.flip_y(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cratefall_core::{FlipCode, LevelData, TileRecord};

    #[test]
    fn test_tiles_follow_layer_order_then_reverse_record_order() {
        let data = LevelData::new(3, 64, 64, 16)
            .with_layer(
                "spike",
                vec![TileRecord::new([0.0, 0.0], [0.0, 48.0], FlipCode::None)],
            )
            .with_layer(
                "bg",
                vec![
                    TileRecord::new([16.0, 0.0], [32.0, 0.0], FlipCode::Vertical),
                    TileRecord::new([32.0, 0.0], [0.0, 0.0], FlipCode::Horizontal),
                ],
            )
            .with_layer(
                "col",
                vec![TileRecord::new([48.0, 16.0], [16.0, 48.0], FlipCode::Both)],
            );
        let level = Level::from_data("level3", &data).unwrap();
        let draws = tile_draws(&level);

        let layers: Vec<_> = draws.iter().map(|d| d.layer).collect();
        assert_eq!(
            layers,
            vec![
                LayerKind::Background,
                LayerKind::Background,
                LayerKind::Collision,
                LayerKind::Spike,
            ]
        );
        // Second bg record first
        assert_eq!(draws[0].dst, Aabb::new(0.0, 0.0, 16.0, 16.0));
        assert!(draws[0].flip_x && !draws[0].flip_y);
        assert_eq!(draws[1].dst, Aabb::new(32.0, 0.0, 16.0, 16.0));
        assert!(!draws[1].flip_x && draws[1].flip_y);
        assert_eq!(draws[2].src, Aabb::new(48.0, 16.0, 16.0, 16.0));
        assert!(draws[2].flip_x && draws[2].flip_y);
    }

    #[test]
    fn test_backdrop_per_level() {
        assert_eq!(Backdrop::for_level(0), Backdrop::Sky);
        assert_eq!(Backdrop::for_level(2), Backdrop::Solid(BACKDROP_COLOR));
    }
}
