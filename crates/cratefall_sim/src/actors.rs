//! The dynamic bodies of a running level

use crate::arena::CrateArena;
use crate::body::RigidBody;
use crate::player::Player;
use crate::resolver::{BodyId, BodySet};

/// The player and every live crate
///
/// Bodies are enumerated player first, then crates in slot order. The player
/// pushes crates and crates push each other, but nothing pushes the player.
#[derive(Debug, Clone)]
pub struct Actors {
    pub player: Player,
    pub crates: CrateArena,
}

impl Actors {
    pub fn new(player: Player, crates: CrateArena) -> Self {
        Self { player, crates }
    }
}

impl BodySet for Actors {
    fn ids(&self) -> Vec<BodyId> {
        std::iter::once(BodyId::Player)
            .chain(self.crates.handles().into_iter().map(BodyId::Crate))
            .collect()
    }

    fn body(&self, id: BodyId) -> Option<&RigidBody> {
        match id {
            BodyId::Player => Some(&self.player.body),
            BodyId::Crate(handle) => self.crates.get(handle).map(|c| &c.body),
        }
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        match id {
            BodyId::Player => Some(&mut self.player.body),
            BodyId::Crate(handle) => self.crates.get_mut(handle).map(|c| &mut c.body),
        }
    }

    fn can_push(&self, _mover: BodyId, obstacle: BodyId) -> bool {
        matches!(obstacle, BodyId::Crate(_))
    }
}
