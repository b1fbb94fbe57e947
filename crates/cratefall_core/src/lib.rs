//! Core data structures for cratefall
//!
//! This crate provides the level ingestion model the simulation runs on:
//! - `TileRecord` - A placed tile with atlas source and flip code
//! - `Layer` - An ordered, read-only tile collection tagged with a `LayerKind`
//! - `Level` - A validated level with layers and entity spawns
//! - `LevelProject` - Every level of the game, keyed by `level<N>`
//! - `LevelStore` - The single current level and its lookups
//! - `GameConfig` - Tuning and presentation settings

mod config;
mod entity;
mod error;
mod layer;
mod level;
mod project;
mod store;
mod tile;

pub use config::{CameraConfig, CrateConfig, GameConfig, PlayerConfig, ViewportConfig};
pub use entity::{EntityKind, SpawnPoint};
pub use error::{ConfigError, LoadError};
pub use layer::{Layer, LayerKind};
pub use level::{Level, LevelData, MAX_LEVEL_CELLS};
pub use project::{level_key, LevelProject};
pub use store::LevelStore;
pub use tile::{FlipCode, InvalidFlipCode, TileRecord, DEFAULT_TILE_SIZE};
