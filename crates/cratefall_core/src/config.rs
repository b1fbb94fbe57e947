//! Tuning and presentation settings
//!
//! All values are per simulation tick and in pixels. Every field has a
//! default so a config file only needs to list what it overrides.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub viewport: ViewportConfig,
    pub camera: CameraConfig,
    pub player: PlayerConfig,
    pub crates: CrateConfig,
}

impl GameConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("viewport.width", self.viewport.width),
            ("viewport.height", self.viewport.height),
            ("viewport.window_width", self.viewport.window_width),
            ("viewport.window_height", self.viewport.window_height),
            ("player.width", self.player.width),
            ("player.height", self.player.height),
            ("crates.width", self.crates.width),
            ("crates.height", self.crates.height),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigError::Invalid(format!("{} must be > 0", name)));
        }
        if !(0.0..=1.0).contains(&self.camera.lerp) {
            return Err(ConfigError::Invalid(
                "camera.lerp must be within 0..=1".to_string(),
            ));
        }
        if self.crates.capacity == 0 {
            return Err(ConfigError::Invalid("crates.capacity must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Logical render resolution and the window it is scaled into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 180.0,
            window_width: 1280.0,
            window_height: 720.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Subtracted from the horizontal half-viewport offset
    pub margin_x: f32,
    /// Fraction of the remaining distance covered each tick
    pub lerp: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            margin_x: 20.0,
            lerp: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub friction: f32,
    pub gravity: f32,
    pub terminal_velocity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_velocity: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 12.0,
            height: 20.0,
            max_speed: 2.5,
            acceleration: 0.4,
            friction: 0.3,
            gravity: 0.35,
            terminal_velocity: 8.0,
            jump_velocity: -6.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrateConfig {
    pub width: f32,
    pub height: f32,
    /// Maximum number of live crates per level
    pub capacity: usize,
    /// Cap on the per-tick displacement of a dragged crate
    pub max_drag_speed: f32,
    /// Top-left of the crate sprite in the tile atlas
    pub atlas_src: [f32; 2],
}

impl Default for CrateConfig {
    fn default() -> Self {
        Self {
            width: 32.0,
            height: 32.0,
            capacity: 64,
            max_drag_speed: 12.0,
            atlas_src: [0.0, 96.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.crates.capacity, 64);
        assert_eq!(config.camera.lerp, 0.1);
    }

    #[test]
    fn test_partial_override() {
        let config = GameConfig::from_toml_str(
            r#"
            [player]
            max_speed = 4.0

            [viewport]
            width = 640.0
            "#,
        )
        .unwrap();

        assert_eq!(config.player.max_speed, 4.0);
        assert_eq!(config.player.gravity, PlayerConfig::default().gravity);
        assert_eq!(config.viewport.width, 640.0);
        assert_eq!(config.viewport.height, 180.0);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = GameConfig::from_toml_str("[crates]\ncapacity = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = GameConfig::from_toml_str("[camera]\nlerp = 2.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = GameConfig::from_toml_str("[player]\nwidth = -1.0").unwrap_err();
        assert!(err.to_string().contains("player.width"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = GameConfig::from_toml_str("[player\nwidth = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_toml_round_trip_and_load() {
        let mut config = GameConfig::default();
        config.player.jump_velocity = -9.0;
        let text = config.to_toml_string().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cratefall.toml");
        std::fs::write(&path, text).unwrap();

        assert_eq!(GameConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = GameConfig::from_toml_str(include_str!("../../../assets/cratefall.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
