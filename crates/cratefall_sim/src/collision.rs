//! Static collision geometry built from a level's collision layer
//!
//! Solid tiles are rasterized into a cell grid so the resolver only tests the
//! handful of cells a body can reach in one tick (broad phase), never the
//! whole layer.

use crate::geometry::{Aabb, Axis, EPSILON};
use bevy_math::Vec2;
use cratefall_core::{LayerKind, Level};

/// Grid of solid cells plus the level bounds
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionMap {
    tile_size: f32,
    columns: i32,
    rows: i32,
    solid: Vec<bool>,
    bounds: Vec2,
}

impl CollisionMap {
    /// A map with no solid cells
    ///
    /// A grid whose cell count does not fit in memory is left without cells,
    /// so nothing inside it can be marked solid.
    pub fn empty(bounds: Vec2, tile_size: f32) -> Self {
        let columns = (bounds.x / tile_size).ceil().max(0.0) as i32;
        let rows = (bounds.y / tile_size).ceil().max(0.0) as i32;
        let (columns, rows, cells) = match (columns as usize).checked_mul(rows as usize) {
            Some(cells) => (columns, rows, cells),
            None => (0, 0, 0),
        };
        Self {
            tile_size,
            columns,
            rows,
            solid: vec![false; cells],
            bounds,
        }
    }

    /// Rasterize the collision layer of a level
    pub fn from_level(level: &Level) -> Self {
        let [width, height] = level.size();
        let mut map = Self::empty(Vec2::new(width, height), level.tile_size() as f32);
        for tile in level.tiles(LayerKind::Collision) {
            map.set_solid_at(Vec2::new(tile.position[0], tile.position[1]));
        }
        map
    }

    /// Mark the cell containing a world position as solid
    pub fn set_solid_at(&mut self, world: Vec2) {
        let column = self.cell(world.x);
        let row = self.cell(world.y);
        if let Some(index) = self.index(column, row) {
            self.solid[index] = true;
        }
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn bounds_aabb(&self) -> Aabb {
        Aabb::new(0.0, 0.0, self.bounds.x, self.bounds.y)
    }

    /// Whether a cell is solid; cells outside the grid are open
    pub fn is_solid(&self, column: i32, row: i32) -> bool {
        self.index(column, row)
            .map(|index| self.solid[index])
            .unwrap_or(false)
    }

    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|s| **s).count()
    }

    pub fn cell_aabb(&self, column: i32, row: i32) -> Aabb {
        Aabb::new(
            column as f32 * self.tile_size,
            row as f32 * self.tile_size,
            self.tile_size,
            self.tile_size,
        )
    }

    /// Solid cells whose interior overlaps `aabb`
    pub fn solid_cells_overlapping(&self, aabb: &Aabb) -> Vec<(i32, i32)> {
        let (c0, c1) = self.span(aabb, Axis::X);
        let (r0, r1) = self.span(aabb, Axis::Y);
        let mut cells = Vec::new();
        for row in r0..=r1 {
            for column in c0..=c1 {
                if self.is_solid(column, row) {
                    cells.push((column, row));
                }
            }
        }
        cells
    }

    pub fn overlaps_solid(&self, aabb: &Aabb) -> bool {
        !self.solid_cells_overlapping(aabb).is_empty()
    }

    /// Total area of `aabb` covered by solid cells
    pub fn overlap_area(&self, aabb: &Aabb) -> f32 {
        self.solid_cells_overlapping(aabb)
            .into_iter()
            .map(|(c, r)| self.cell_aabb(c, r).overlap_area(aabb))
            .sum()
    }

    /// How far `aabb` can travel along `axis` toward `amount` before touching
    /// a solid cell or the level edge
    ///
    /// Every lane between the start and the target edge is tested, so fast
    /// bodies cannot skip over thin walls. The result has the sign of
    /// `amount` (or is zero) and never exceeds it in magnitude.
    pub fn sweep(&self, aabb: &Aabb, axis: Axis, amount: f32) -> f32 {
        if amount == 0.0 {
            return 0.0;
        }

        let (cross_start, cross_end) = self.span(aabb, axis.other());
        let lane_blocked = |lane: i32| {
            (cross_start..=cross_end).any(|cross| match axis {
                Axis::X => self.is_solid(lane, cross),
                Axis::Y => self.is_solid(cross, lane),
            })
        };

        if amount > 0.0 {
            let leading = aabb.max(axis);
            let mut travel = amount.min(axis.of(self.bounds) - leading);
            let first = self.cell(leading - EPSILON) + 1;
            let last = self.cell(leading + travel - EPSILON);
            for lane in first..=last {
                if lane_blocked(lane) {
                    travel = travel.min(lane as f32 * self.tile_size - leading);
                    break;
                }
            }
            travel.max(0.0)
        } else {
            let leading = aabb.min(axis);
            let mut travel = (-amount).min(leading);
            let first = self.cell(leading + EPSILON) - 1;
            let last = self.cell(leading - travel + EPSILON);
            for lane in (last..=first).rev() {
                if lane_blocked(lane) {
                    travel = travel.min(leading - (lane + 1) as f32 * self.tile_size);
                    break;
                }
            }
            -travel.max(0.0)
        }
    }

    /// Inclusive range of cells the interior of `aabb` covers along `axis`
    fn span(&self, aabb: &Aabb, axis: Axis) -> (i32, i32) {
        (
            self.cell(aabb.min(axis) + EPSILON),
            self.cell(aabb.max(axis) - EPSILON),
        )
    }

    fn cell(&self, world: f32) -> i32 {
        (world / self.tile_size).floor() as i32
    }

    fn index(&self, column: i32, row: i32) -> Option<usize> {
        if column < 0 || row < 0 || column >= self.columns || row >= self.rows {
            return None;
        }
        Some(row as usize * self.columns as usize + column as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10x10 cells of 16px with a floor on row 9 and a wall on column 5
    fn room() -> CollisionMap {
        let mut map = CollisionMap::empty(Vec2::new(160.0, 160.0), 16.0);
        for column in 0..10 {
            map.set_solid_at(Vec2::new(column as f32 * 16.0, 144.0));
        }
        map.set_solid_at(Vec2::new(80.0, 128.0));
        map
    }

    #[test]
    fn test_from_level_marks_collision_tiles() {
        use cratefall_core::{FlipCode, LevelData, TileRecord};

        let data = LevelData::new(0, 64, 64, 16).with_layer(
            "col",
            vec![
                TileRecord::new([0.0, 0.0], [0.0, 48.0], FlipCode::None),
                TileRecord::new([0.0, 0.0], [16.0, 48.0], FlipCode::Both),
            ],
        );
        let level = Level::from_data("level0", &data).unwrap();
        let map = CollisionMap::from_level(&level);

        assert_eq!(map.solid_count(), 2);
        assert!(map.is_solid(0, 3));
        assert!(map.is_solid(1, 3));
        assert!(!map.is_solid(2, 3));
        assert!(!map.is_solid(-1, 3));
    }

    #[test]
    fn test_sweep_down_stops_on_floor() {
        let map = room();
        let body = Aabb::new(16.0, 100.0, 12.0, 20.0);
        let travel = map.sweep(&body, Axis::Y, 50.0);
        assert!((travel - (144.0 - 120.0)).abs() < 1e-4);
    }

    #[test]
    fn test_sweep_does_not_tunnel() {
        let map = room();
        // Far larger than a tile in one step
        let body = Aabb::new(0.0, 128.0, 12.0, 16.0);
        let travel = map.sweep(&body, Axis::X, 140.0);
        assert!((travel - (80.0 - 12.0)).abs() < 1e-4);
    }

    #[test]
    fn test_sweep_left_stops_at_wall_and_bounds() {
        let map = room();
        let body = Aabb::new(100.0, 128.0, 12.0, 16.0);
        let travel = map.sweep(&body, Axis::X, -40.0);
        assert!((travel - -(100.0 - 96.0)).abs() < 1e-4);

        let body = Aabb::new(4.0, 20.0, 12.0, 16.0);
        assert!((map.sweep(&body, Axis::X, -10.0) - -4.0).abs() < 1e-4);
    }

    #[test]
    fn test_sweep_ignores_rows_only_touched() {
        let map = room();
        // Bottom edge exactly on the floor: sliding sideways is free
        let body = Aabb::new(16.0, 124.0, 12.0, 20.0);
        assert!((map.sweep(&body, Axis::X, 10.0) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_resting_body_cannot_sink() {
        let map = room();
        let body = Aabb::new(16.0, 124.0, 12.0, 20.0);
        assert_eq!(map.sweep(&body, Axis::Y, 0.35), 0.0);
    }

    #[test]
    fn test_long_grid_marks_last_cell() {
        let mut map = CollisionMap::empty(Vec2::new(70_000.0, 2.0), 1.0);
        map.set_solid_at(Vec2::new(69_999.5, 1.5));
        assert!(map.is_solid(69_999, 1));
        assert_eq!(map.solid_count(), 1);
    }

    #[test]
    fn test_overlap_queries() {
        let map = room();
        let inside = Aabb::new(76.0, 120.0, 12.0, 16.0);
        assert!(map.overlaps_solid(&inside));
        assert!(map.overlap_area(&inside) > 0.0);

        let resting = Aabb::new(16.0, 124.0, 12.0, 20.0);
        assert!(!map.overlaps_solid(&resting));
        assert_eq!(map.overlap_area(&resting), 0.0);
    }
}
