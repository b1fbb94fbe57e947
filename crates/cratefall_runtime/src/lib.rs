//! Bevy front end for cratefall
//!
//! [`CratefallPlugin`] loads a level project through the asset server, runs
//! the simulation in `FixedUpdate` and mirrors every tick's render frame into
//! sprites, a 2D camera and a debug overlay.
//!
//! ```rust,ignore
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(CratefallPlugin::new(GameConfig::default()))
//!     .run();
//! ```

pub mod input;
pub mod loader;
pub mod sync;

pub use input::PendingInput;
pub use loader::{LevelProjectLoader, ProjectLoadError};

use bevy::asset::LoadState;
use bevy::prelude::*;
use cratefall_core::{GameConfig, LevelProject};
use cratefall_sim::{GameState, PlayerCharacter, RenderFrame};

/// Simulation ticks per second; every tuning value is per tick
pub const TICK_RATE_HZ: f64 = 60.0;

/// Default project path inside the assets folder
pub const DEFAULT_PROJECT_PATH: &str = "maps/world.map.json";

/// Tile atlas shared by level tiles and crates
pub const TILE_ATLAS_PATH: &str = "textures/tiles.png";

/// Backdrop image behind the first level
pub const SKY_PATH: &str = "textures/sky.png";

/// Plugin wiring the simulation into a Bevy app
pub struct CratefallPlugin {
    pub config: GameConfig,
    pub project_path: String,
    pub character: PlayerCharacter,
}

impl CratefallPlugin {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            project_path: DEFAULT_PROJECT_PATH.to_string(),
            character: PlayerCharacter::default(),
        }
    }

    pub fn with_project(mut self, path: impl Into<String>) -> Self {
        self.project_path = path.into();
        self
    }

    pub fn with_character(mut self, character: PlayerCharacter) -> Self {
        self.character = character;
        self
    }
}

impl Plugin for CratefallPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<LevelProject>()
            .init_asset_loader::<LevelProjectLoader>()
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
            .insert_resource(RuntimeConfig {
                game: self.config.clone(),
                project_path: self.project_path.clone(),
                character: self.character,
            })
            .init_resource::<ClearColor>()
            .init_resource::<PendingInput>()
            .init_resource::<GameSession>()
            .init_resource::<sync::ShownLevel>()
            .add_systems(Startup, (load_runtime_assets, sync::setup_view).chain())
            .add_systems(FixedUpdate, tick_game)
            .add_systems(
                Update,
                (
                    input::sample_input,
                    start_game_when_loaded,
                    refresh_frame,
                    (
                        sync::sync_tiles,
                        sync::sync_crates,
                        sync::sync_player,
                        sync::sync_camera,
                        sync::sync_overlay,
                    ),
                )
                    .chain(),
            );
    }
}

/// Settings the plugin was built with
#[derive(Resource, Debug, Clone)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub project_path: String,
    pub character: PlayerCharacter,
}

/// Handles of everything loaded through the asset server
#[derive(Resource, Debug, Clone)]
pub struct RuntimeAssets {
    pub project: Handle<LevelProject>,
    pub tiles: Handle<Image>,
    pub sky: Handle<Image>,
}

/// The running game, if any, and the frame to show
#[derive(Resource, Debug, Default)]
pub struct GameSession {
    pub state: Option<GameState>,
    pub frame: Option<RenderFrame>,
    /// Set once starting or running the game failed; nothing is retried
    pub failed: bool,
}

fn load_runtime_assets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<RuntimeConfig>,
) {
    info!("Loading level project '{}'", config.project_path);
    commands.insert_resource(RuntimeAssets {
        project: asset_server.load(config.project_path.clone()),
        tiles: asset_server.load(TILE_ATLAS_PATH),
        sky: asset_server.load(SKY_PATH),
    });
}

fn start_game_when_loaded(
    asset_server: Res<AssetServer>,
    assets: Res<RuntimeAssets>,
    projects: Res<Assets<LevelProject>>,
    config: Res<RuntimeConfig>,
    mut session: ResMut<GameSession>,
) {
    if session.state.is_some() || session.failed {
        return;
    }
    let Some(project) = projects.get(&assets.project) else {
        if let LoadState::Failed(err) = asset_server.load_state(assets.project.id()) {
            error!("Failed to load '{}': {}", config.project_path, err);
            session.failed = true;
        }
        return;
    };

    info!("Level project ready ({} levels)", project.level_count());
    let mut state = GameState::new(project.clone(), config.game.clone(), config.character);
    match state.enter() {
        Ok(()) => session.state = Some(state),
        Err(err) => {
            error!("Failed to start game: {}", err);
            session.failed = true;
        }
    }
}

fn tick_game(mut pending: ResMut<PendingInput>, mut session: ResMut<GameSession>) {
    let Some(state) = session.state.as_mut() else {
        return;
    };
    let input = pending.take_frame();
    if let Err(err) = state.update(&input) {
        error!("Game stopped: {}", err);
        session.state = None;
        session.frame = None;
        session.failed = true;
    }
}

fn refresh_frame(time: Res<Time>, mut session: ResMut<GameSession>) {
    let delta = time.delta_secs();
    let fps = if delta > 0.0 {
        (1.0 / delta).round() as u32
    } else {
        0
    };
    let frame = session.state.as_ref().and_then(|state| state.draw(fps));
    session.frame = frame;
}
