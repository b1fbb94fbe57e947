//! Debug overlay text

use bevy_math::Vec2;

/// Vertical spacing between overlay lines, in screen pixels
pub const LINE_HEIGHT: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayColor {
    Lime,
    Orange,
    Red,
    White,
}

impl OverlayColor {
    pub fn rgba(&self) -> [u8; 4] {
        match self {
            OverlayColor::Lime => [0, 158, 47, 255],
            OverlayColor::Orange => [255, 161, 0, 255],
            OverlayColor::Red => [230, 41, 55, 255],
            OverlayColor::White => [255, 255, 255, 255],
        }
    }
}

/// Color of the FPS line: lime at 30 and above, orange from 15, red below
pub fn fps_color(fps: u32) -> OverlayColor {
    match fps {
        30.. => OverlayColor::Lime,
        15..=29 => OverlayColor::Orange,
        _ => OverlayColor::Red,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLine {
    pub text: String,
    pub color: OverlayColor,
    /// Top-left of the line in screen pixels
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DebugOverlay {
    pub lines: Vec<OverlayLine>,
}

impl DebugOverlay {
    pub fn build(fps: u32, position: Vec2, velocity: Vec2, pointer: Vec2) -> Self {
        let entries = [
            (format!("{:2} FPS", fps), fps_color(fps)),
            (format!("pos: {}", pair(position)), OverlayColor::White),
            (format!("vel: {}", pair(velocity)), OverlayColor::White),
            (format!("world mouse: {}", pair(pointer)), OverlayColor::White),
        ];
        let lines = entries
            .into_iter()
            .enumerate()
            .map(|(i, (text, color))| OverlayLine {
                text,
                color,
                position: Vec2::new(0.0, LINE_HEIGHT * i as f32),
            })
            .collect();
        Self { lines }
    }
}

fn pair(v: Vec2) -> String {
    format!("({:.2}, {:.2})", v.x, v.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_thresholds() {
        assert_eq!(fps_color(60), OverlayColor::Lime);
        assert_eq!(fps_color(30), OverlayColor::Lime);
        assert_eq!(fps_color(29), OverlayColor::Orange);
        assert_eq!(fps_color(15), OverlayColor::Orange);
        assert_eq!(fps_color(14), OverlayColor::Red);
        assert_eq!(fps_color(0), OverlayColor::Red);
    }

    #[test]
    fn test_overlay_lines() {
        let overlay = DebugOverlay::build(
            7,
            Vec2::new(100.0, 556.0),
            Vec2::new(-0.5, 0.0),
            Vec2::new(12.25, 3.0),
        );
        let texts: Vec<_> = overlay.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                " 7 FPS",
                "pos: (100.00, 556.00)",
                "vel: (-0.50, 0.00)",
                "world mouse: (12.25, 3.00)",
            ]
        );
        assert_eq!(overlay.lines[0].color, OverlayColor::Red);
        assert_eq!(overlay.lines[3].position, Vec2::new(0.0, 30.0));
    }
}
