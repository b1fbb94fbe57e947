//! Error types for level and configuration loading

use thiserror::Error;

/// Error type for level loading failures
///
/// Every variant is fatal for the state transition that triggered the load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read level data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse level data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No level data for '{0}'")]
    MissingLevel(String),
    #[error("Level '{key}' has invalid size {width}x{height} for tile size {tile_size}")]
    InvalidDimensions {
        key: String,
        width: u32,
        height: u32,
        tile_size: u32,
    },
    #[error("Level '{key}' has {cells} cells, more than the limit of {limit}")]
    TooLarge { key: String, cells: u64, limit: u64 },
    #[error("Level '{key}': '{kind}' spawn at ({x}, {y}) lies outside the level")]
    SpawnOutOfBounds {
        key: String,
        kind: &'static str,
        x: f32,
        y: f32,
    },
}

/// Error type for configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}
