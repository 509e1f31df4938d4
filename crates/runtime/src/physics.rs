//! # Arena Physics Hygiene
//!
//! End-of-frame guards around the avian step: the [`Arena`] gravity is
//! mirrored into the physics world, runaway bodies are speed-capped,
//! and anything that escapes the arena is pulled back, respawned (for
//! bodies that declare a [`RespawnPoint`]) or despawned.

use avian3d::prelude::*;
use bevy::prelude::*;
use tracing::{debug, info};

use scrum_common::Arena;

/// Where a body reappears after falling out of the arena.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct RespawnPoint(pub Vec3);

/// What to do with a body at the given position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsAction {
    Keep,
    /// Fell past the kill plane; teleport to the respawn point.
    Respawn(Vec3),
    /// Fell past the kill plane with nowhere to come back to.
    Despawn,
    /// Escaped the side or top bounds; clamp back inside.
    Clamp(Vec3),
}

/// Decide the fate of a body from its position and respawn point.
pub fn bounds_action(arena: &Arena, position: Vec3, respawn: Option<Vec3>) -> BoundsAction {
    if position.y < arena.fall_height {
        return match respawn {
            Some(point) => BoundsAction::Respawn(point),
            None => BoundsAction::Despawn,
        };
    }
    if !arena.is_in_bounds(position) {
        return BoundsAction::Clamp(arena.clamp_to_bounds(position));
    }
    BoundsAction::Keep
}

/// Keep the avian [`Gravity`] resource in step with the arena config.
pub fn apply_arena_gravity(arena: Res<Arena>, mut gravity: ResMut<Gravity>) {
    if arena.is_changed() && gravity.0 != arena.gravity {
        gravity.0 = arena.gravity;
        info!(gravity = ?arena.gravity, "arena gravity applied");
    }
}

/// Cap linear speed so solver explosions never fling a body across the
/// map in one frame.
pub fn clamp_speeds(arena: Res<Arena>, mut query: Query<&mut LinearVelocity>) {
    let max = arena.max_entity_speed;

    for mut velocity in query.iter_mut() {
        let speed = velocity.length();
        if speed > max {
            velocity.0 *= max / speed;
            debug!(speed, "clamped runaway body");
        }
    }
}

/// Apply [`bounds_action`] to every dynamic body.
pub fn clamp_to_world_bounds(
    arena: Res<Arena>,
    mut commands: Commands,
    mut query: Query<(
        Entity,
        &mut Transform,
        &mut LinearVelocity,
        Option<&RespawnPoint>,
    )>,
) {
    for (entity, mut transform, mut velocity, respawn) in query.iter_mut() {
        let position = transform.translation;

        match bounds_action(&arena, position, respawn.map(|point| point.0)) {
            BoundsAction::Keep => {}
            BoundsAction::Respawn(point) => {
                transform.translation = point;
                velocity.0 = Vec3::ZERO;
                info!(from = ?position, "body fell out, respawned");
            }
            BoundsAction::Despawn => {
                commands.entity(entity).despawn();
                info!(at = ?position, "body fell out, despawned");
            }
            BoundsAction::Clamp(clamped) => {
                transform.translation = clamped;
                velocity.0 = Vec3::ZERO;
                debug!(at = ?position, "body escaped arena bounds");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_inside_the_arena_are_left_alone() {
        let arena = Arena::default();
        assert_eq!(bounds_action(&arena, Vec3::new(10.0, 2.0, -10.0), None), BoundsAction::Keep);
    }

    #[test]
    fn fallen_body_with_respawn_point_comes_back() {
        let arena = Arena::default();
        let spawn = Vec3::new(-40.0, 2.0, 0.0);
        let action = bounds_action(&arena, Vec3::new(0.0, -11.0, 0.0), Some(spawn));
        assert_eq!(action, BoundsAction::Respawn(spawn));
    }

    #[test]
    fn fallen_body_without_respawn_point_is_despawned() {
        let arena = Arena::default();
        // Clamping would pin it to the bounds floor forever; it must go.
        let action = bounds_action(&arena, Vec3::new(0.0, -11.0, 0.0), None);
        assert_eq!(action, BoundsAction::Despawn);
    }

    #[test]
    fn escaped_body_is_clamped_back_inside() {
        let arena = Arena::default();
        let action = bounds_action(&arena, Vec3::new(60.0, 2.0, 0.0), None);
        assert_eq!(action, BoundsAction::Clamp(Vec3::new(50.0, 2.0, 0.0)));
    }
}
