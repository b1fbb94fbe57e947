//! The level collection produced by the map importer

use crate::{LevelData, LoadError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Key under which the level with the given index is stored
pub fn level_key(index: usize) -> String {
    format!("level{}", index)
}

/// All levels of a game, keyed by `level<N>`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(
    feature = "bevy",
    derive(bevy::asset::Asset, bevy::reflect::TypePath)
)]
pub struct LevelProject {
    #[serde(default)]
    pub levels: HashMap<String, LevelData>,
}

impl LevelProject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a level at the given index, replacing any existing one
    pub fn with_level(mut self, index: usize, data: LevelData) -> Self {
        self.levels.insert(level_key(index), data);
        self
    }

    pub fn level(&self, index: usize) -> Option<&LevelData> {
        self.levels.get(&level_key(index))
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Read and parse a project file from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path)?;
        Self::from_json_bytes(&bytes)
    }
}
