//! Per-player shared status record.
//!
//! Both the rope and the movement controller consult the "rope attached" flag, but neither
//! owns it. The flag lives in one resource keyed by player id, and both controllers reach it
//! through [`AttachmentStore`] so tests can swap in a plain map.
//!
//! Ordering: the rope systems write the flag in the fixed step before locomotion reads it,
//! so a detach is visible to movement in the same step.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

/// Stable player identity, independent of the ECS entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PlayerId(pub u32);

/// Read/write access to the shared "rope attached" flag.
pub trait AttachmentStore {
    fn is_rope_attached(&self, player: PlayerId) -> bool;
    fn set_rope_attached(&mut self, player: PlayerId, attached: bool);
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerStatus {
    pub rope_attached: bool,
    /// Position delta per fixed step, scaled. See `plugins::momentum`.
    pub momentum: Vec2,
}

#[derive(Resource, Debug, Default)]
pub struct PlayerRegistry {
    players: HashMap<PlayerId, PlayerStatus>,
}

impl PlayerRegistry {
    /// Insert (or reset) the record for `player`.
    pub fn register(&mut self, player: PlayerId) {
        self.players.insert(player, PlayerStatus::default());
    }

    pub fn status(&self, player: PlayerId) -> Option<&PlayerStatus> {
        self.players.get(&player)
    }

    pub fn set_momentum(&mut self, player: PlayerId, momentum: Vec2) {
        self.players.entry(player).or_default().momentum = momentum;
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl AttachmentStore for PlayerRegistry {
    #[inline]
    fn is_rope_attached(&self, player: PlayerId) -> bool {
        self.players.get(&player).is_some_and(|s| s.rope_attached)
    }

    #[inline]
    fn set_rope_attached(&mut self, player: PlayerId, attached: bool) {
        self.players.entry(player).or_default().rope_attached = attached;
    }
}
