//! Crates: passive bodies that fall, get pushed and can be dragged

use crate::body::RigidBody;
use crate::player::Gravity;
use bevy_math::Vec2;
use cratefall_core::CrateConfig;

/// Size class of a crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrateKind {
    Big,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Crate {
    pub body: RigidBody,
    pub kind: CrateKind,
    /// Top-left of the crate sprite in the tile atlas
    pub atlas_src: [f32; 2],
    /// Whether the pointer currently holds this crate
    pub dragged: bool,
}

impl Crate {
    pub fn new(kind: CrateKind, position: Vec2, config: &CrateConfig) -> Self {
        let size = match kind {
            CrateKind::Big => Vec2::new(config.width, config.height),
        };
        Self {
            body: RigidBody::new(position, size),
            kind,
            atlas_src: config.atlas_src,
            dragged: false,
        }
    }

    /// Pick up or let go of the crate
    ///
    /// Letting go drops any sideways motion; the crate keeps its vertical
    /// velocity and falls from there.
    pub fn set_dragged(&mut self, dragged: bool) {
        if self.dragged && !dragged {
            self.body.velocity.x = 0.0;
        }
        self.dragged = dragged;
    }

    /// Compute this tick's velocity before resolution
    ///
    /// A dragged crate follows the pointer motion (capped at `max_drag_speed`)
    /// and ignores gravity; otherwise it only falls.
    pub fn steer(&mut self, pointer_velocity: Vec2, gravity: Gravity, max_drag_speed: f32) {
        if self.dragged {
            self.body.velocity = pointer_velocity.clamp_length_max(max_drag_speed);
        } else {
            self.body.velocity.x = 0.0;
            self.body.velocity.y = gravity.apply(self.body.velocity.y);
        }
    }
}
