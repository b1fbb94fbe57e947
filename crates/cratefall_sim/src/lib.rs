//! Simulation core for cratefall
//!
//! Everything here is engine-agnostic and deterministic: given a level and a
//! stream of [`FrameInput`]s, [`GameState`] produces the same bodies, camera
//! and [`RenderFrame`]s every run.
//!
//! - [`RigidBody`] and [`resolve`] - axis-separated movement against tiles
//!   and other bodies, shared by the player and crates
//! - [`CollisionMap`] - the level's collision layer as a solid-cell grid
//! - [`CrateArena`] - slot-stable crate storage with bounded capacity
//! - [`Player`] / [`Crate`] - the two controllers
//! - [`CameraTracker`] - smoothed follow camera clamped to the level
//! - [`GameState`] - the enter / update / draw / exit lifecycle

mod actors;
mod arena;
mod body;
mod camera;
mod collision;
mod crates;
mod debug;
mod geometry;
mod input;
mod player;
mod render;
mod resolver;
mod state;

pub use actors::Actors;
pub use arena::{CrateArena, CrateHandle};
pub use body::{Contacts, RigidBody};
pub use camera::CameraTracker;
pub use collision::CollisionMap;
pub use crates::{Crate, CrateKind};
pub use debug::{fps_color, DebugOverlay, OverlayColor, OverlayLine, LINE_HEIGHT};
pub use geometry::{Aabb, Axis, EPSILON};
pub use input::{FrameInput, PointerTracker};
pub use player::{Animation, Facing, Gravity, MovementState, Player, PlayerCharacter};
pub use render::{
    tile_draws, Backdrop, CameraView, CrateDraw, PlayerDraw, RenderFrame, TileDraw,
    BACKDROP_COLOR,
};
pub use resolver::{resolve, settle_into_bounds, BodyId, BodySet};
pub use state::{GameError, GameState};

pub use bevy_math::Vec2;
