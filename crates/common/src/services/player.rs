//! Player and camera markers shared between the runtime and the app.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Marker for the player character entity. Exactly one exists per
/// match; enemies resolve their distance-to-player queries through it.
#[derive(Component, Debug, Default, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Third-person follow camera attached to the player.
#[derive(Component, Debug, Clone, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct PlayerCamera {
    /// Offset from the player position (behind and above)
    pub offset: Vec3,
    /// Look-at height above the player's feet
    pub look_height: f32,
    /// Per-frame positional lerp factor, 0..1
    pub smoothing: f32,
}

impl Default for PlayerCamera {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 3.0, 7.0),
            look_height: 1.0,
            smoothing: 0.1,
        }
    }
}
