//! Camera that follows the player and never shows outside the level

use crate::geometry::Aabb;
use bevy_math::Vec2;
use cratefall_core::{CameraConfig, ViewportConfig};

/// 2D camera in world pixels
///
/// The visible rectangle is `[target - offset, target - offset + viewport]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTracker {
    pub target: Vec2,
    pub offset: Vec2,
    pub zoom: f32,
    pub rotation: f32,
    viewport: Vec2,
    lerp: f32,
}

impl CameraTracker {
    pub fn new(viewport: &ViewportConfig, config: &CameraConfig) -> Self {
        Self {
            target: Vec2::ZERO,
            offset: Vec2::new(viewport.width * 0.5 - config.margin_x, viewport.height * 0.5),
            zoom: 1.0,
            rotation: 0.0,
            viewport: Vec2::new(viewport.width, viewport.height),
            lerp: config.lerp,
        }
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Restrict a target so the visible rectangle stays inside the level
    ///
    /// On an axis where the level is smaller than the viewport the left or
    /// top edge is kept.
    pub fn clamp_target(&self, target: Vec2, level_size: Vec2) -> Vec2 {
        let low = self.offset;
        let high = level_size - self.viewport + self.offset;
        target.min(high).max(low)
    }

    /// Jump straight to `focus`, e.g. after a level load
    pub fn reset(&mut self, focus: Vec2, level_size: Vec2) {
        self.zoom = 1.0;
        self.rotation = 0.0;
        let goal = self.clamp_target(focus, level_size);
        self.target = self.clamp_target(goal.floor(), level_size);
    }

    /// Ease toward `focus` by the configured fraction, snapped to whole pixels
    pub fn follow(&mut self, focus: Vec2, level_size: Vec2) {
        let goal = self.clamp_target(focus, level_size);
        let eased = self.target + (goal - self.target) * self.lerp;
        self.target = self.clamp_target(eased.floor(), level_size);
    }

    /// World-space top-left corner of the view
    pub fn view_origin(&self) -> Vec2 {
        self.target - self.offset
    }

    pub fn visible_rect(&self) -> Aabb {
        Aabb::from_position_size(self.view_origin(), self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> CameraTracker {
        CameraTracker::new(&ViewportConfig::default(), &CameraConfig::default())
    }

    #[test]
    fn test_offset_from_viewport_and_margin() {
        let camera = tracker();
        assert_eq!(camera.offset, Vec2::new(140.0, 90.0));
        assert_eq!(camera.zoom, 1.0);
        assert_eq!(camera.rotation, 0.0);
    }

    #[test]
    fn test_reset_clamps_at_level_origin() {
        let mut camera = tracker();
        let level = Vec2::new(640.0, 640.0);
        camera.reset(Vec2::new(6.0, 10.0), level);
        assert_eq!(camera.target, camera.offset);
        assert_eq!(camera.visible_rect().position(), Vec2::ZERO);
    }

    #[test]
    fn test_clamp_keeps_view_inside_far_edges() {
        let mut camera = tracker();
        let level = Vec2::new(640.0, 640.0);
        camera.reset(Vec2::new(639.0, 639.0), level);
        let view = camera.visible_rect();
        assert_eq!(view.right(), 640.0);
        assert_eq!(view.bottom(), 640.0);
    }

    #[test]
    fn test_small_level_pins_left_top() {
        let mut camera = tracker();
        camera.reset(Vec2::new(150.0, 60.0), Vec2::new(200.0, 100.0));
        assert_eq!(camera.view_origin(), Vec2::ZERO);
    }

    #[test]
    fn test_follow_eases_and_floors() {
        let mut camera = tracker();
        let level = Vec2::new(1280.0, 640.0);
        camera.reset(Vec2::new(300.0, 300.0), level);

        camera.follow(Vec2::new(400.0, 300.0), level);
        assert_eq!(camera.target, Vec2::new(310.0, 300.0));

        camera.follow(Vec2::new(315.5, 300.0), level);
        assert_eq!(camera.target.x, camera.target.x.floor());
    }

    #[test]
    fn test_follow_reaches_left_clamp() {
        let mut camera = tracker();
        let level = Vec2::new(1280.0, 640.0);
        camera.reset(Vec2::new(600.0, 300.0), level);
        for _ in 0..200 {
            camera.follow(Vec2::new(6.0, 300.0), level);
        }
        assert_eq!(camera.target.x, camera.offset.x);
    }
}
