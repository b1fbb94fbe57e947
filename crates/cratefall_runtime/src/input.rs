//! Keyboard and mouse sampling into `FrameInput`
//!
//! Input is read every rendered frame but consumed by the fixed-rate
//! simulation. Held keys are plain levels; one-shot triggers are latched until
//! the next simulation tick takes them.

use crate::RuntimeConfig;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use cratefall_sim::FrameInput;

/// Input gathered since the last simulation tick
#[derive(Resource, Debug, Default)]
pub struct PendingInput {
    frame: FrameInput,
}

impl PendingInput {
    /// Hand the collected input to a tick and clear the latched triggers
    pub fn take_frame(&mut self) -> FrameInput {
        let frame = self.frame;
        self.frame.restart = false;
        self.frame.toggle_debug = false;
        frame
    }

    pub fn peek(&self) -> &FrameInput {
        &self.frame
    }
}

/// Scale a cursor position from the actual window into the configured
/// window resolution
pub fn scale_cursor(cursor: Vec2, window_size: Vec2, configured: Vec2) -> Vec2 {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return cursor;
    }
    cursor * configured / window_size
}

pub(crate) fn sample_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Res<RuntimeConfig>,
    mut pending: ResMut<PendingInput>,
) {
    let any = |keys: &[KeyCode]| keys.iter().any(|key| keyboard.pressed(*key));
    let frame = &mut pending.frame;

    frame.left = any(&[KeyCode::KeyA, KeyCode::ArrowLeft]);
    frame.right = any(&[KeyCode::KeyD, KeyCode::ArrowRight]);
    frame.jump = any(&[KeyCode::Space, KeyCode::KeyW, KeyCode::ArrowUp]);
    frame.primary_held = mouse.pressed(MouseButton::Left);
    frame.restart |= keyboard.just_pressed(KeyCode::KeyR);
    frame.toggle_debug |= keyboard.just_pressed(KeyCode::F2);

    let Ok(window) = windows.single() else {
        return;
    };
    if let Some(cursor) = window.cursor_position() {
        let viewport = &config.game.viewport;
        frame.pointer_screen = scale_cursor(
            cursor,
            Vec2::new(window.width(), window.height()),
            Vec2::new(viewport.window_width, viewport.window_height),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers_are_consumed_once() {
        let mut pending = PendingInput::default();
        pending.frame.restart = true;
        pending.frame.right = true;

        let first = pending.take_frame();
        assert!(first.restart && first.right);

        let second = pending.take_frame();
        assert!(!second.restart);
        assert!(second.right);
        assert!(!pending.peek().toggle_debug);
    }

    #[test]
    fn test_scale_cursor() {
        let scaled = scale_cursor(
            Vec2::new(320.0, 180.0),
            Vec2::new(640.0, 360.0),
            Vec2::new(1280.0, 720.0),
        );
        assert_eq!(scaled, Vec2::new(640.0, 360.0));
        assert_eq!(
            scale_cursor(Vec2::ONE, Vec2::ZERO, Vec2::new(1280.0, 720.0)),
            Vec2::ONE
        );
    }
}
