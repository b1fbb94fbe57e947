//! Holds the one level that is current

use crate::{
    level_key, EntityKind, LayerKind, Level, LevelProject, LoadError, SpawnPoint, TileRecord,
};
use tracing::debug;

/// Owns the level project and the currently loaded level
///
/// A load either fully succeeds and replaces the current level, or fails and
/// leaves the previous level untouched.
#[derive(Debug, Clone, Default)]
pub struct LevelStore {
    project: LevelProject,
    current: Option<(usize, Level)>,
}

impl LevelStore {
    pub fn new(project: LevelProject) -> Self {
        Self {
            project,
            current: None,
        }
    }

    pub fn project(&self) -> &LevelProject {
        &self.project
    }

    /// Load the level with the given index and make it current
    pub fn load(&mut self, index: usize) -> Result<&Level, LoadError> {
        let key = level_key(index);
        let data = self
            .project
            .level(index)
            .ok_or_else(|| LoadError::MissingLevel(key.clone()))?;
        let level = Level::from_data(&key, data)?;

        debug!(
            "Loaded '{}' ({}x{}, {} crate spawns)",
            key,
            level.width(),
            level.height(),
            level.spawns(EntityKind::CrateBig).len()
        );

        let (_, level) = &*self.current.insert((index, level));
        Ok(level)
    }

    /// Drop the current level, if any
    pub fn unload(&mut self) {
        if let Some((index, _)) = self.current.take() {
            debug!("Unloaded '{}'", level_key(index));
        }
    }

    pub fn current(&self) -> Option<&Level> {
        self.current.as_ref().map(|(_, level)| level)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current.as_ref().map(|(index, _)| *index)
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Tiles of a layer in the current level, empty when nothing is loaded
    pub fn layer(&self, kind: LayerKind) -> &[TileRecord] {
        self.current().map(|l| l.tiles(kind)).unwrap_or(&[])
    }

    pub fn layer_by_name(&self, name: &str) -> &[TileRecord] {
        self.current().map(|l| l.tiles_by_name(name)).unwrap_or(&[])
    }

    /// Spawns of an entity kind in the current level
    pub fn entities(&self, kind: EntityKind) -> &[SpawnPoint] {
        self.current().map(|l| l.spawns(kind)).unwrap_or(&[])
    }

    pub fn entities_by_name(&self, name: &str) -> &[SpawnPoint] {
        self.current()
            .map(|l| l.spawns_by_name(name))
            .unwrap_or(&[])
    }
}
