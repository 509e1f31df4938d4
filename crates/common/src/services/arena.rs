//! # Arena
//!
//! World-level physics configuration for the current level: gravity,
//! bounds and the speed ceiling. Serialized with level configs so a
//! level can tune physics without code changes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Arena - world physics and bounds for the loaded level.
#[derive(Resource, Reflect, Clone, Debug, Serialize, Deserialize)]
#[reflect(Resource)]
pub struct Arena {
    /// Gravity vector (units/s²)
    pub gravity: Vec3,

    /// Hard cap on any actor's speed (units/s); exceeding velocities
    /// are clamped and logged
    pub max_entity_speed: f32,

    /// World bounding box (min corner)
    pub world_bounds_min: Vec3,

    /// World bounding box (max corner)
    pub world_bounds_max: Vec3,

    /// Height below which an actor counts as fallen out of the level
    pub fall_height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.82, 0.0),
            max_entity_speed: 50.0,
            world_bounds_min: Vec3::new(-50.0, -10.0, -50.0),
            world_bounds_max: Vec3::new(50.0, 100.0, 50.0),
            fall_height: -10.0,
        }
    }
}

impl Arena {
    pub fn is_in_bounds(&self, position: Vec3) -> bool {
        position.cmpge(self.world_bounds_min).all() && position.cmple(self.world_bounds_max).all()
    }

    pub fn clamp_to_bounds(&self, position: Vec3) -> Vec3 {
        position.clamp(self.world_bounds_min, self.world_bounds_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_check_and_clamp() {
        let arena = Arena::default();
        assert!(arena.is_in_bounds(Vec3::ZERO));
        assert!(!arena.is_in_bounds(Vec3::new(60.0, 0.0, 0.0)));
        assert_eq!(
            arena.clamp_to_bounds(Vec3::new(60.0, 0.0, 0.0)),
            Vec3::new(50.0, 0.0, 0.0)
        );
    }
}
