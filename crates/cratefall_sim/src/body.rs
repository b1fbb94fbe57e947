//! The movement primitive shared by the player and crates

use crate::geometry::{Aabb, Axis};
use bevy_math::Vec2;
use bitflags::bitflags;

bitflags! {
    /// Sides on which a body was blocked during its last resolution
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Contacts: u8 {
        const GROUND = 1 << 0;
        const LEFT_WALL = 1 << 1;
        const RIGHT_WALL = 1 << 2;
        const CEILING = 1 << 3;
    }
}

impl Contacts {
    /// Flag set when motion along `axis` in direction `sign` is blocked
    pub fn blocked(axis: Axis, sign: f32) -> Contacts {
        match (axis, sign > 0.0) {
            (Axis::X, true) => Contacts::RIGHT_WALL,
            (Axis::X, false) => Contacts::LEFT_WALL,
            (Axis::Y, true) => Contacts::GROUND,
            (Axis::Y, false) => Contacts::CEILING,
        }
    }
}

/// Bounding box, velocity and contact flags
///
/// Velocity is in pixels per tick and doubles as the displacement the
/// resolver attempts each tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigidBody {
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub contacts: Contacts,
}

impl RigidBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
            contacts: Contacts::empty(),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_position_size(self.position, self.size)
    }

    pub fn on_ground(&self) -> bool {
        self.contacts.contains(Contacts::GROUND)
    }

    /// Stop all motion and forget contacts, e.g. when respawning
    pub fn reset_motion(&mut self) {
        self.velocity = Vec2::ZERO;
        self.contacts = Contacts::empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_flags() {
        assert_eq!(Contacts::blocked(Axis::X, 1.0), Contacts::RIGHT_WALL);
        assert_eq!(Contacts::blocked(Axis::X, -1.0), Contacts::LEFT_WALL);
        assert_eq!(Contacts::blocked(Axis::Y, 3.0), Contacts::GROUND);
        assert_eq!(Contacts::blocked(Axis::Y, -0.5), Contacts::CEILING);
    }

    #[test]
    fn test_reset_motion() {
        let mut body = RigidBody::new(Vec2::new(4.0, 8.0), Vec2::new(12.0, 20.0));
        body.velocity = Vec2::new(1.0, -2.0);
        body.contacts = Contacts::GROUND | Contacts::LEFT_WALL;
        assert!(body.on_ground());

        body.reset_motion();
        assert_eq!(body.velocity, Vec2::ZERO);
        assert!(!body.on_ground());
        assert_eq!(body.aabb(), Aabb::new(4.0, 8.0, 12.0, 20.0));
    }
}
