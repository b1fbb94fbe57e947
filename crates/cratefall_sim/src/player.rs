//! Player controller: run, jump and fall
//!
//! Each tick runs in two halves around the resolver. [`Player::steer`] turns
//! input into a desired velocity, the resolver moves the body, then
//! [`Player::settle`] reads the fresh contacts back into the movement state.

use crate::body::{Contacts, RigidBody};
use crate::input::FrameInput;
use bevy_math::Vec2;
use cratefall_core::PlayerConfig;

/// Downward acceleration with a speed cap, shared by the player and crates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    pub acceleration: f32,
    pub terminal_velocity: f32,
}

impl Gravity {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            acceleration: config.gravity,
            terminal_velocity: config.terminal_velocity,
        }
    }

    /// Next vertical velocity after one tick of falling
    pub fn apply(&self, vy: f32) -> f32 {
        (vy + self.acceleration).min(self.terminal_velocity)
    }
}

/// Which of the two playable characters is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerCharacter {
    #[default]
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovementState {
    Grounded,
    #[default]
    Airborne,
}

/// Animation tag for the front end's sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Animation {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
}

impl Animation {
    pub fn name(&self) -> &'static str {
        match self {
            Animation::Idle => "idle",
            Animation::Run => "run",
            Animation::Jump => "jump",
            Animation::Fall => "fall",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: RigidBody,
    pub character: PlayerCharacter,
    pub facing: Facing,
    pub state: MovementState,
    pub animation: Animation,
    /// Offset from the sprite center to the body's top-left corner
    pub sprite_origin: Vec2,
    /// Size of the level the player was last spawned into
    pub level_size: Vec2,
}

impl Player {
    pub fn new(character: PlayerCharacter, config: &PlayerConfig) -> Self {
        let size = Vec2::new(config.width, config.height);
        Self {
            body: RigidBody::new(Vec2::ZERO, size),
            character,
            facing: Facing::default(),
            state: MovementState::default(),
            animation: Animation::default(),
            sprite_origin: -size * 0.5,
            level_size: Vec2::ZERO,
        }
    }

    /// Place the player at a spawn point with all motion cleared
    pub fn spawn_at(&mut self, position: Vec2, level_size: Vec2) {
        self.body.position = position;
        self.body.reset_motion();
        self.level_size = level_size;
        self.state = MovementState::Airborne;
        self.animation = Animation::Idle;
    }

    /// Compute this tick's velocity from input
    pub fn steer(&mut self, input: &FrameInput, config: &PlayerConfig) {
        let direction = input.horizontal();
        let vx = self.body.velocity.x;
        self.body.velocity.x = if direction != 0.0 {
            self.facing = if direction < 0.0 {
                Facing::Left
            } else {
                Facing::Right
            };
            let target = direction * config.max_speed;
            approach(vx, target, config.acceleration)
        } else {
            approach(vx, 0.0, config.friction)
        };

        self.body.velocity.y = if input.jump && self.state == MovementState::Grounded {
            config.jump_velocity
        } else {
            Gravity::from_config(config).apply(self.body.velocity.y)
        };
    }

    /// Update movement state and animation from the contacts of the last
    /// resolution
    pub fn settle(&mut self, contacts: Contacts) {
        self.state = if contacts.contains(Contacts::GROUND) {
            MovementState::Grounded
        } else {
            MovementState::Airborne
        };

        self.animation = match self.state {
            MovementState::Grounded if self.body.velocity.x.abs() > 0.05 => Animation::Run,
            MovementState::Grounded => Animation::Idle,
            MovementState::Airborne if self.body.velocity.y < 0.0 => Animation::Jump,
            MovementState::Airborne => Animation::Fall,
        };
    }

    /// Sprite center in world space, tracked by the camera
    pub fn focus(&self) -> Vec2 {
        self.body.position - self.sprite_origin
    }

    pub fn is_grounded(&self) -> bool {
        self.state == MovementState::Grounded
    }
}

/// Move `value` toward `target` by at most `step`
fn approach(value: f32, target: f32, step: f32) -> f32 {
    if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(left: bool, right: bool, jump: bool) -> FrameInput {
        FrameInput {
            left,
            right,
            jump,
            ..Default::default()
        }
    }

    #[test]
    fn test_accelerates_to_max_speed() {
        let config = PlayerConfig::default();
        let mut player = Player::new(PlayerCharacter::First, &config);
        for _ in 0..50 {
            player.steer(&held(false, true, false), &config);
        }
        assert_eq!(player.body.velocity.x, config.max_speed);
        assert_eq!(player.facing, Facing::Right);

        player.steer(&held(true, false, false), &config);
        assert!(player.body.velocity.x < config.max_speed);
        assert_eq!(player.facing, Facing::Left);
    }

    #[test]
    fn test_friction_stops_without_overshoot() {
        let config = PlayerConfig::default();
        let mut player = Player::new(PlayerCharacter::First, &config);
        player.body.velocity.x = 1.0;
        for _ in 0..10 {
            player.steer(&FrameInput::default(), &config);
        }
        assert_eq!(player.body.velocity.x, 0.0);
        // Facing keeps the last horizontal input
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let config = PlayerConfig::default();
        let mut player = Player::new(PlayerCharacter::Second, &config);

        player.steer(&held(false, false, true), &config);
        assert_eq!(player.body.velocity.y, config.gravity);

        player.settle(Contacts::GROUND);
        player.body.velocity.y = 0.0;
        player.steer(&held(false, false, true), &config);
        assert_eq!(player.body.velocity.y, config.jump_velocity);
    }

    #[test]
    fn test_gravity_caps_at_terminal_velocity() {
        let config = PlayerConfig::default();
        let mut player = Player::new(PlayerCharacter::First, &config);
        for _ in 0..200 {
            player.steer(&FrameInput::default(), &config);
        }
        assert_eq!(player.body.velocity.y, config.terminal_velocity);
    }

    #[test]
    fn test_settle_picks_animation() {
        let config = PlayerConfig::default();
        let mut player = Player::new(PlayerCharacter::First, &config);

        player.body.velocity = Vec2::new(0.0, -3.0);
        player.settle(Contacts::empty());
        assert_eq!(player.animation, Animation::Jump);
        assert_eq!(player.state, MovementState::Airborne);

        player.body.velocity = Vec2::new(0.0, 2.0);
        player.settle(Contacts::empty());
        assert_eq!(player.animation, Animation::Fall);

        player.body.velocity = Vec2::new(1.5, 0.0);
        player.settle(Contacts::GROUND | Contacts::RIGHT_WALL);
        assert_eq!(player.animation, Animation::Run);
        assert!(player.is_grounded());

        player.body.velocity = Vec2::ZERO;
        player.settle(Contacts::GROUND);
        assert_eq!(player.animation, Animation::Idle);
    }

    #[test]
    fn test_focus_is_sprite_center() {
        let config = PlayerConfig::default();
        let mut player = Player::new(PlayerCharacter::First, &config);
        player.spawn_at(Vec2::new(100.0, 40.0), Vec2::new(640.0, 640.0));
        assert_eq!(player.focus(), Vec2::new(106.0, 50.0));
        assert_eq!(player.level_size, Vec2::new(640.0, 640.0));
    }
}
