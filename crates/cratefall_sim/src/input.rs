//! Per-tick input signals and pointer tracking

use crate::camera::CameraTracker;
use bevy_math::Vec2;
use cratefall_core::ViewportConfig;

/// Input sampled by the front end for one tick
///
/// `restart` and `toggle_debug` are edge triggers (pressed this tick); the
/// rest are levels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub restart: bool,
    pub toggle_debug: bool,
    pub primary_held: bool,
    /// Pointer position in window pixels
    pub pointer_screen: Vec2,
}

impl FrameInput {
    /// -1, 0 or 1; opposite directions cancel out
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Pointer position in world space and its motion since the last tick
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    world: Vec2,
    velocity: Vec2,
    primed: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a window position into the world seen by `camera`
    pub fn screen_to_world(screen: Vec2, viewport: &ViewportConfig, camera: &CameraTracker) -> Vec2 {
        let scale = Vec2::new(
            viewport.width / viewport.window_width,
            viewport.height / viewport.window_height,
        );
        screen * scale + camera.target - camera.offset
    }

    /// Record this tick's pointer sample
    ///
    /// The first sample after [`PointerTracker::reset`] reports zero velocity.
    pub fn sample(&mut self, screen: Vec2, viewport: &ViewportConfig, camera: &CameraTracker) {
        let world = Self::screen_to_world(screen, viewport, camera);
        self.velocity = if self.primed {
            world - self.world
        } else {
            Vec2::ZERO
        };
        self.world = world;
        self.primed = true;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn world(&self) -> Vec2 {
        self.world
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cratefall_core::CameraConfig;

    fn camera() -> CameraTracker {
        let mut camera = CameraTracker::new(&ViewportConfig::default(), &CameraConfig::default());
        camera.target = Vec2::new(200.0, 100.0);
        camera
    }

    #[test]
    fn test_horizontal_cancels() {
        let mut input = FrameInput {
            left: true,
            ..Default::default()
        };
        assert_eq!(input.horizontal(), -1.0);
        input.right = true;
        assert_eq!(input.horizontal(), 0.0);
        input.left = false;
        assert_eq!(input.horizontal(), 1.0);
    }

    #[test]
    fn test_screen_to_world_scales_by_window() {
        let viewport = ViewportConfig::default();
        let camera = camera();
        // offset = (320 * 0.5 - 20, 180 * 0.5) = (140, 90)
        let world = PointerTracker::screen_to_world(Vec2::new(400.0, 80.0), &viewport, &camera);
        assert_eq!(world, Vec2::new(100.0 + 60.0, 20.0 + 10.0));
    }

    #[test]
    fn test_velocity_is_difference_between_samples() {
        let viewport = ViewportConfig::default();
        let camera = camera();
        let mut pointer = PointerTracker::new();

        pointer.sample(Vec2::new(400.0, 80.0), &viewport, &camera);
        assert_eq!(pointer.velocity(), Vec2::ZERO);

        pointer.sample(Vec2::new(408.0, 72.0), &viewport, &camera);
        assert_eq!(pointer.velocity(), Vec2::new(2.0, -2.0));

        pointer.reset();
        pointer.sample(Vec2::new(0.0, 0.0), &viewport, &camera);
        assert_eq!(pointer.velocity(), Vec2::ZERO);
    }
}
