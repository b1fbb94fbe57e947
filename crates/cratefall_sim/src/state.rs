//! The main game state: one level being played
//!
//! `GameState` owns everything the simulation touches. A front end calls
//! [`GameState::enter`] once, then [`GameState::update`] and
//! [`GameState::draw`] every tick, and [`GameState::exit`] when leaving.

use crate::actors::Actors;
use crate::arena::{CrateArena, CrateHandle};
use crate::camera::CameraTracker;
use crate::collision::CollisionMap;
use crate::crates::{Crate, CrateKind};
use crate::debug::DebugOverlay;
use crate::input::{FrameInput, PointerTracker};
use crate::player::{Gravity, Player, PlayerCharacter};
use crate::render::{tile_draws, Backdrop, CameraView, CrateDraw, PlayerDraw, RenderFrame};
use crate::resolver::{resolve, BodyId};
use bevy_math::Vec2;
use cratefall_core::{
    level_key, EntityKind, GameConfig, Level, LevelProject, LevelStore, LoadError,
    DEFAULT_TILE_SIZE,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that stop a level from starting
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Failed to load level: {0}")]
    Load(#[from] LoadError),
    #[error("Level '{0}' has no player spawn")]
    MissingPlayerSpawn(String),
}

#[derive(Debug)]
pub struct GameState {
    config: GameConfig,
    store: LevelStore,
    level_index: usize,
    collision: CollisionMap,
    actors: Actors,
    camera: CameraTracker,
    pointer: PointerTracker,
    grabbed: Option<CrateHandle>,
    primary_was_held: bool,
    debug_overlay: bool,
    active: bool,
}

impl GameState {
    /// Create an inactive state that will start on level 0
    pub fn new(project: LevelProject, config: GameConfig, character: PlayerCharacter) -> Self {
        let player = Player::new(character, &config.player);
        let crates = CrateArena::new(config.crates.capacity);
        let camera = CameraTracker::new(&config.viewport, &config.camera);
        Self {
            store: LevelStore::new(project),
            level_index: 0,
            collision: CollisionMap::empty(Vec2::ZERO, DEFAULT_TILE_SIZE as f32),
            actors: Actors::new(player, crates),
            camera,
            pointer: PointerTracker::new(),
            grabbed: None,
            primary_was_held: false,
            debug_overlay: true,
            active: false,
            config,
        }
    }

    /// Load the current level index and spawn its actors
    ///
    /// Entering an already active state reloads the level.
    pub fn enter(&mut self) -> Result<(), GameError> {
        self.exit();
        self.load_level(self.level_index)?;
        info!("Entered {}", level_key(self.level_index));
        Ok(())
    }

    /// Release the level and every crate; does nothing when already exited
    pub fn exit(&mut self) {
        if !self.active {
            return;
        }
        let released = self.actors.crates.len();
        self.actors.crates.clear();
        self.store.unload();
        self.grabbed = None;
        self.primary_was_held = false;
        self.pointer.reset();
        self.active = false;
        info!(
            "Exited {} (released {} crates)",
            level_key(self.level_index),
            released
        );
    }

    /// Reload the current level from its spawn points
    pub fn restart(&mut self) -> Result<(), GameError> {
        info!("Restarting {}", level_key(self.level_index));
        self.exit();
        self.enter()
    }

    /// Switch to another level, keeping the player and camera
    ///
    /// On failure the previous level keeps running untouched.
    pub fn goto_level(&mut self, index: usize) -> Result<(), GameError> {
        self.load_level(index)?;
        info!("Moved to {}", level_key(index));
        Ok(())
    }

    /// Advance the simulation by one tick
    pub fn update(&mut self, input: &FrameInput) -> Result<(), GameError> {
        if !self.active {
            return Ok(());
        }
        if input.restart {
            return self.restart();
        }
        if input.toggle_debug {
            self.debug_overlay = !self.debug_overlay;
        }

        let level_size = self.actors.player.level_size;
        self.pointer
            .sample(input.pointer_screen, &self.config.viewport, &self.camera);

        self.actors.player.steer(input, &self.config.player);
        let contacts = resolve(BodyId::Player, &self.collision, &mut self.actors);
        self.actors.player.settle(contacts);

        self.update_grab(input.primary_held);

        let gravity = Gravity::from_config(&self.config.player);
        let pointer_velocity = self.pointer.velocity();
        for handle in self.actors.crates.handles() {
            if let Some(item) = self.actors.crates.get_mut(handle) {
                item.steer(pointer_velocity, gravity, self.config.crates.max_drag_speed);
            }
            resolve(BodyId::Crate(handle), &self.collision, &mut self.actors);
        }

        self.camera.follow(self.actors.player.focus(), level_size);
        Ok(())
    }

    /// Describe the current tick for a front end; `None` while inactive
    pub fn draw(&self, fps: u32) -> Option<RenderFrame> {
        if !self.active {
            return None;
        }
        let level = self.store.current()?;
        let player = &self.actors.player;

        let crates = self
            .actors
            .crates
            .iter()
            .map(|(handle, item)| CrateDraw {
                handle,
                bounds: item.body.aabb(),
                atlas_src: item.atlas_src,
            })
            .collect();

        let overlay = self.debug_overlay.then(|| {
            DebugOverlay::build(
                fps,
                player.body.position,
                player.body.velocity,
                self.pointer.world(),
            )
        });

        Some(RenderFrame {
            level_index: self.level_index,
            backdrop: Backdrop::for_level(self.level_index),
            camera: CameraView::from(&self.camera),
            tiles: tile_draws(level),
            crates,
            player: PlayerDraw {
                bounds: player.body.aabb(),
                character: player.character,
                facing: player.facing,
                animation: player.animation,
            },
            overlay,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level(&self) -> Option<&Level> {
        self.store.current()
    }

    pub fn store(&self) -> &LevelStore {
        &self.store
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn collision(&self) -> &CollisionMap {
        &self.collision
    }

    pub fn player(&self) -> &Player {
        &self.actors.player
    }

    pub fn crates(&self) -> &CrateArena {
        &self.actors.crates
    }

    pub fn crate_count(&self) -> usize {
        self.actors.crates.len()
    }

    /// Remove a crate from play; removing a freed slot does nothing
    pub fn remove_crate(&mut self, handle: CrateHandle) -> Option<Crate> {
        if self.grabbed == Some(handle) {
            self.grabbed = None;
        }
        self.actors.crates.remove(handle)
    }

    pub fn grabbed(&self) -> Option<CrateHandle> {
        self.grabbed
    }

    pub fn camera(&self) -> &CameraTracker {
        &self.camera
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn debug_overlay_enabled(&self) -> bool {
        self.debug_overlay
    }

    /// Load `index` and rebuild everything that depends on the level
    ///
    /// Nothing is changed unless the level loads and has a player spawn.
    fn load_level(&mut self, index: usize) -> Result<(), GameError> {
        let key = level_key(index);
        if let Some(data) = self.store.project().level(index) {
            if !data.has_spawn(EntityKind::Player) {
                return Err(GameError::MissingPlayerSpawn(key));
            }
        }

        let level = self.store.load(index)?;
        let level_size = Vec2::from(level.size());
        let collision = CollisionMap::from_level(level);
        let player_spawn = level
            .spawns(EntityKind::Player)
            .first()
            .map(|spawn| Vec2::from(spawn.position()))
            .ok_or_else(|| GameError::MissingPlayerSpawn(key.clone()))?;
        let crate_spawns: Vec<Vec2> = level
            .spawns(EntityKind::CrateBig)
            .iter()
            .map(|spawn| Vec2::from(spawn.position()))
            .collect();
        debug!(
            "{}: {} solid cells, {} crate spawns",
            key,
            collision.solid_count(),
            crate_spawns.len()
        );

        self.collision = collision;
        self.actors.crates.clear();
        for position in crate_spawns {
            let item = Crate::new(CrateKind::Big, position, &self.config.crates);
            if self.actors.crates.insert(item).is_err() {
                warn!(
                    "{}: crate limit of {} reached, skipping spawn at ({}, {})",
                    key,
                    self.actors.crates.capacity(),
                    position.x,
                    position.y
                );
            }
        }

        self.actors.player.spawn_at(player_spawn, level_size);
        self.camera.reset(self.actors.player.focus(), level_size);
        self.pointer.reset();
        self.grabbed = None;
        self.primary_was_held = false;
        self.level_index = index;
        self.active = true;
        Ok(())
    }

    /// Pick up the first crate under the pointer on press, drop it on release
    fn update_grab(&mut self, held: bool) {
        let pressed = held && !self.primary_was_held;
        self.primary_was_held = held;

        if !held {
            if let Some(handle) = self.grabbed.take() {
                if let Some(item) = self.actors.crates.get_mut(handle) {
                    item.set_dragged(false);
                }
            }
            return;
        }
        if !pressed || self.grabbed.is_some() {
            return;
        }

        let pointer = self.pointer.world();
        let target = self
            .actors
            .crates
            .iter()
            .find(|(_, item)| item.body.aabb().contains_point(pointer))
            .map(|(handle, _)| handle);
        if let Some(handle) = target {
            if let Some(item) = self.actors.crates.get_mut(handle) {
                item.set_dragged(true);
            }
            self.grabbed = Some(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cratefall_core::{FlipCode, LevelData, SpawnPoint, TileRecord};

    fn floor_level(uid: i64) -> LevelData {
        let floor = (0..10)
            .map(|i| TileRecord::new([0.0, 0.0], [i as f32 * 32.0, 288.0], FlipCode::None))
            .collect();
        LevelData::new(uid, 320, 320, 32)
            .with_layer("col", floor)
            .with_entities("player", vec![SpawnPoint::new(40.0, 100.0)])
            .with_entities(
                "crate_big",
                vec![SpawnPoint::new(120.0, 200.0), SpawnPoint::new(200.0, 200.0)],
            )
    }

    fn game(project: LevelProject) -> GameState {
        GameState::new(project, GameConfig::default(), PlayerCharacter::First)
    }

    #[test]
    fn test_enter_spawns_actors() {
        let mut state = game(LevelProject::new().with_level(0, floor_level(1)));
        assert!(!state.is_active());
        assert!(state.draw(60).is_none());

        state.enter().unwrap();
        assert!(state.is_active());
        assert_eq!(state.crate_count(), 2);
        assert_eq!(state.player().body.position, Vec2::new(40.0, 100.0));
        assert_eq!(state.collision().solid_count(), 10);
    }

    #[test]
    fn test_player_tracks_level_size_across_levels() {
        let wide = floor_level(2);
        let wide = LevelData::new(2, 640, 320, 32)
            .with_layer("col", wide.layers["col"].clone())
            .with_entities("player", vec![SpawnPoint::new(600.0, 100.0)]);
        let project = LevelProject::new()
            .with_level(0, floor_level(1))
            .with_level(1, wide);
        let mut state = game(project);

        state.enter().unwrap();
        assert_eq!(state.player().level_size, Vec2::new(320.0, 320.0));

        state.goto_level(1).unwrap();
        assert_eq!(state.player().level_size, Vec2::new(640.0, 320.0));
        for _ in 0..30 {
            state.update(&FrameInput::default()).unwrap();
        }
        // Player near the far edge: the view is held against it
        let view = state.camera().visible_rect();
        assert!((view.right() - 640.0).abs() < 1e-3);
    }

    #[test]
    fn test_exit_is_idempotent() {
        let mut state = game(LevelProject::new().with_level(0, floor_level(1)));
        state.enter().unwrap();
        state.exit();
        assert!(!state.is_active());
        assert_eq!(state.crate_count(), 0);
        assert!(state.level().is_none());
        state.exit();
        assert!(!state.is_active());
    }

    #[test]
    fn test_missing_level_is_fatal() {
        let mut state = game(LevelProject::new());
        let err = state.enter().unwrap_err();
        assert!(matches!(err, GameError::Load(LoadError::MissingLevel(_))));
        assert!(!state.is_active());
    }

    #[test]
    fn test_missing_player_spawn_is_fatal() {
        let data = LevelData::new(1, 320, 320, 32);
        let mut state = game(LevelProject::new().with_level(0, data));
        let err = state.enter().unwrap_err();
        assert!(matches!(err, GameError::MissingPlayerSpawn(key) if key == "level0"));
    }

    #[test]
    fn test_failed_goto_keeps_current_level() {
        let project = LevelProject::new()
            .with_level(0, floor_level(1))
            .with_level(1, LevelData::new(2, 320, 320, 32));
        let mut state = game(project);
        state.enter().unwrap();

        assert!(state.goto_level(1).is_err());
        assert!(state.goto_level(5).is_err());
        assert!(state.is_active());
        assert_eq!(state.level_index(), 0);
        assert_eq!(state.level().map(|l| l.uid()), Some(1));
        assert_eq!(state.crate_count(), 2);
    }

    #[test]
    fn test_toggle_debug_overlay() {
        let mut state = game(LevelProject::new().with_level(0, floor_level(1)));
        state.enter().unwrap();
        assert!(state.draw(60).and_then(|f| f.overlay).is_some());

        let toggle = FrameInput {
            toggle_debug: true,
            ..Default::default()
        };
        state.update(&toggle).unwrap();
        assert!(!state.debug_overlay_enabled());
        assert!(state.draw(60).and_then(|f| f.overlay).is_none());
    }

    #[test]
    fn test_remove_crate_twice() {
        let mut state = game(LevelProject::new().with_level(0, floor_level(1)));
        state.enter().unwrap();
        let handle = state.crates().handles()[0];
        assert!(state.remove_crate(handle).is_some());
        assert!(state.remove_crate(handle).is_none());
        assert_eq!(state.crate_count(), 1);
    }
}
