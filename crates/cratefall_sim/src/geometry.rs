//! Axis-aligned boxes in world pixels (y grows downward)

use bevy_math::Vec2;

/// Tolerance used when comparing edges
pub const EPSILON: f32 = 0.001;

/// One of the two resolution axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Component of `v` along this axis
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    /// Mutable component of `v` along this axis
    pub fn of_mut(self, v: &mut Vec2) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
        }
    }
}

/// Axis-aligned bounding box, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Near edge along an axis (left or top)
    pub fn min(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.left(),
            Axis::Y => self.top(),
        }
    }

    /// Far edge along an axis (right or bottom)
    pub fn max(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.right(),
            Axis::Y => self.bottom(),
        }
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// Whether the two boxes share more than an edge along `axis`
    pub fn spans_overlap(&self, other: &Aabb, axis: Axis) -> bool {
        self.min(axis) < other.max(axis) - EPSILON && other.min(axis) < self.max(axis) - EPSILON
    }

    /// Whether the interiors overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.spans_overlap(other, Axis::X) && self.spans_overlap(other, Axis::Y)
    }

    /// Area shared by both boxes
    pub fn overlap_area(&self, other: &Aabb) -> f32 {
        let w = self.right().min(other.right()) - self.left().max(other.left());
        let h = self.bottom().min(other.bottom()) - self.top().max(other.top());
        w.max(0.0) * h.max(0.0)
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Whether `other` lies fully inside this box
    pub fn contains(&self, other: &Aabb) -> bool {
        other.left() >= self.left() - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.top() >= self.top() - EPSILON
            && other.bottom() <= self.bottom() + EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 16.0, 16.0);
        let b = Aabb::new(16.0, 0.0, 16.0, 16.0);
        assert!(!a.overlaps(&b));
        assert_eq!(a.overlap_area(&b), 0.0);
    }

    #[test]
    fn test_overlap_area() {
        let a = Aabb::new(0.0, 0.0, 16.0, 16.0);
        let b = Aabb::new(8.0, 12.0, 16.0, 16.0);
        assert!(a.overlaps(&b));
        assert_eq!(a.overlap_area(&b), 8.0 * 4.0);
    }

    #[test]
    fn test_axis_accessors() {
        let a = Aabb::new(2.0, 3.0, 10.0, 20.0);
        assert_eq!(a.min(Axis::X), 2.0);
        assert_eq!(a.max(Axis::Y), 23.0);
        assert_eq!(Axis::Y.of(a.size()), 20.0);
        assert_eq!(Axis::X.other(), Axis::Y);
    }

    #[test]
    fn test_contains() {
        let bounds = Aabb::new(0.0, 0.0, 100.0, 100.0);
        assert!(bounds.contains(&Aabb::new(0.0, 90.0, 10.0, 10.0)));
        assert!(!bounds.contains(&Aabb::new(95.0, 0.0, 10.0, 10.0)));
        assert!(bounds.contains_point(Vec2::new(0.0, 0.0)));
        assert!(!bounds.contains_point(Vec2::new(100.0, 50.0)));
    }
}
