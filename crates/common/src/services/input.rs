//! # Input Snapshot
//!
//! Per-frame snapshot of player intent: a movement direction plus the
//! fixed set of named boolean actions. The game crate fills this in
//! from keyboard/mouse once per frame; the runtime only ever reads the
//! snapshot, never the devices.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// The fixed action set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum GameAction {
    Jump,
    Sprint,
    Pass,
    Tackle,
    Interact,
}

/// Input state captured once per frame.
#[derive(Resource, Reflect, Clone, Debug, Default)]
#[reflect(Resource)]
pub struct ActionSnapshot {
    /// Raw movement input: x = strafe (right positive),
    /// y = forward/back (forward negative, screen convention)
    pub movement: Vec2,
    pub jump: bool,
    pub sprint: bool,
    pub pass: bool,
    pub tackle: bool,
    pub interact: bool,
}

impl ActionSnapshot {
    /// Normalized movement direction (unit vector or zero).
    pub fn movement_direction(&self) -> Vec2 {
        self.movement.normalize_or_zero()
    }

    pub fn is_active(&self, action: GameAction) -> bool {
        match action {
            GameAction::Jump => self.jump,
            GameAction::Sprint => self.sprint,
            GameAction::Pass => self.pass,
            GameAction::Tackle => self.tackle,
            GameAction::Interact => self.interact,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_movement_is_normalized() {
        let snapshot = ActionSnapshot {
            movement: Vec2::new(1.0, -1.0),
            ..Default::default()
        };
        let dir = snapshot.movement_direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn no_movement_yields_zero() {
        let snapshot = ActionSnapshot::default();
        assert_eq!(snapshot.movement_direction(), Vec2::ZERO);
    }
}
