//! Level data as authored, and the validated level built from it

use crate::{
    EntityKind, Layer, LayerKind, LoadError, SpawnPoint, TileRecord, DEFAULT_TILE_SIZE,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Largest tile grid a level may describe
pub const MAX_LEVEL_CELLS: u64 = 1 << 22;

fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}

/// A level exactly as the importer produced it
///
/// Layer and entity collections are keyed by their identifiers in the source
/// map. Unknown identifiers are tolerated here and dropped when the data is
/// turned into a [`Level`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelData {
    /// Unique level id
    pub uid: i64,
    /// Width in pixels
    pub px_wid: u32,
    /// Height in pixels
    pub px_hei: u32,
    /// Tile edge length in pixels
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    #[serde(default)]
    pub layers: HashMap<String, Vec<TileRecord>>,
    #[serde(default)]
    pub entities: HashMap<String, Vec<SpawnPoint>>,
}

impl LevelData {
    pub fn new(uid: i64, px_wid: u32, px_hei: u32, tile_size: u32) -> Self {
        Self {
            uid,
            px_wid,
            px_hei,
            tile_size,
            layers: HashMap::new(),
            entities: HashMap::new(),
        }
    }

    /// Add a tile layer under its source identifier
    pub fn with_layer(mut self, name: &str, tiles: Vec<TileRecord>) -> Self {
        self.layers.insert(name.to_string(), tiles);
        self
    }

    /// Add spawn records under an entity identifier
    pub fn with_entities(mut self, name: &str, spawns: Vec<SpawnPoint>) -> Self {
        self.entities.insert(name.to_string(), spawns);
        self
    }

    /// Whether at least one spawn of `kind` was placed
    pub fn has_spawn(&self, kind: EntityKind) -> bool {
        self.entities
            .get(kind.identifier())
            .is_some_and(|spawns| !spawns.is_empty())
    }
}

/// A validated level with layers and spawns resolved to closed tags
#[derive(Debug, Clone)]
pub struct Level {
    key: String,
    uid: i64,
    width: u32,
    height: u32,
    tile_size: u32,
    layers: HashMap<LayerKind, Layer>,
    spawns: HashMap<EntityKind, Vec<SpawnPoint>>,
}

impl Level {
    /// Validate raw level data and resolve its layers and entities
    pub fn from_data(key: &str, data: &LevelData) -> Result<Self, LoadError> {
        let tile_size = data.tile_size;
        if tile_size == 0
            || data.px_wid == 0
            || data.px_hei == 0
            || data.px_wid % tile_size != 0
            || data.px_hei % tile_size != 0
        {
            return Err(LoadError::InvalidDimensions {
                key: key.to_string(),
                width: data.px_wid,
                height: data.px_hei,
                tile_size,
            });
        }
        let cells = u64::from(data.px_wid / tile_size) * u64::from(data.px_hei / tile_size);
        if cells > MAX_LEVEL_CELLS {
            return Err(LoadError::TooLarge {
                key: key.to_string(),
                cells,
                limit: MAX_LEVEL_CELLS,
            });
        }

        let mut layers = HashMap::new();
        for (name, tiles) in &data.layers {
            match LayerKind::from_identifier(name) {
                Some(kind) => {
                    layers.insert(kind, Layer::new(kind, tiles.clone()));
                }
                None => debug!("Level '{}': skipping unknown layer '{}'", key, name),
            }
        }

        let (width, height) = (data.px_wid as f32, data.px_hei as f32);
        let mut spawns = HashMap::new();
        for (name, points) in &data.entities {
            let Some(kind) = EntityKind::from_identifier(name) else {
                debug!("Level '{}': skipping unknown entity kind '{}'", key, name);
                continue;
            };
            if let Some(bad) = points
                .iter()
                .find(|p| !(0.0..width).contains(&p.x) || !(0.0..height).contains(&p.y))
            {
                return Err(LoadError::SpawnOutOfBounds {
                    key: key.to_string(),
                    kind: kind.identifier(),
                    x: bad.x,
                    y: bad.y,
                });
            }
            spawns.insert(kind, points.clone());
        }

        Ok(Self {
            key: key.to_string(),
            uid: data.uid,
            width: data.px_wid,
            height: data.px_hei,
            tile_size,
            layers,
            spawns,
        })
    }

    /// Identifier this level was loaded under (e.g. `level0`)
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn uid(&self) -> i64 {
        self.uid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Pixel size as floats, the form the simulation works in
    pub fn size(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.get(&kind)
    }

    /// Tiles of a layer, empty when the level has no such layer
    pub fn tiles(&self, kind: LayerKind) -> &[TileRecord] {
        self.layers.get(&kind).map(Layer::tiles).unwrap_or(&[])
    }

    /// Tiles of a layer looked up by source identifier
    pub fn tiles_by_name(&self, name: &str) -> &[TileRecord] {
        LayerKind::from_identifier(name)
            .map(|kind| self.tiles(kind))
            .unwrap_or(&[])
    }

    /// Spawn records of an entity kind, empty when none were placed
    pub fn spawns(&self, kind: EntityKind) -> &[SpawnPoint] {
        self.spawns.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn spawns_by_name(&self, name: &str) -> &[SpawnPoint] {
        EntityKind::from_identifier(name)
            .map(|kind| self.spawns(kind))
            .unwrap_or(&[])
    }
}
