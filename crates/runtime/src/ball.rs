//! # Thrown Ball
//!
//! The pass action launches a physical ball from the carrier. The ball
//! is a plain dynamic body; anything it touches resolves through
//! [`CollidingEntities`], and a hit on a Zorgonaut deals tackle damage.
//! The projectile despawns on first contact or when the carrier's
//! return timer would hand the ball back anyway.

use avian3d::prelude::*;
use bevy::prelude::*;
use tracing::info;

use scrum_common::{Vitals, BALL_RETURN_DELAY};

use crate::enemy::Zorgonaut;
use crate::timers::DespawnAfter;

// ============================================================================
// Constants
// ============================================================================

/// Launch speed of a passed ball (m/s).
pub const BALL_SPEED: f32 = 15.0;
/// Damage dealt to a Zorgonaut on a direct hit.
pub const BALL_DAMAGE: f32 = 25.0;
/// Collider radius (m).
pub const BALL_RADIUS: f32 = 0.3;
/// Launch height above the carrier's feet (m).
pub const BALL_LAUNCH_HEIGHT: f32 = 1.2;

// ============================================================================
// Components
// ============================================================================

/// A ball in flight.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Ball {
    /// Entity that threw it, excluded from its collisions.
    pub thrower: Entity,
}

// ============================================================================
// Spawning
// ============================================================================

/// Launch a ball from the carrier, flying the way they face with a
/// slight upward arc. The entity carries physics only; presentation
/// layers attach meshes to fresh [`Ball`]s themselves.
pub fn spawn_thrown_ball(
    commands: &mut Commands,
    thrower: Entity,
    thrower_transform: &Transform,
    now: f32,
) -> Entity {
    let forward = thrower_transform.forward().as_vec3();
    let origin = thrower_transform.translation + Vec3::Y * BALL_LAUNCH_HEIGHT + forward * 0.8;
    let velocity = (forward + Vec3::Y * 0.2).normalize() * BALL_SPEED;

    commands
        .spawn((
            Ball { thrower },
            Transform::from_translation(origin),
            RigidBody::Dynamic,
            Collider::sphere(BALL_RADIUS),
            Mass(0.5),
            LinearVelocity(velocity),
            CollidingEntities::default(),
            DespawnAfter {
                at: now + BALL_RETURN_DELAY,
            },
        ))
        .id()
}

// ============================================================================
// Systems
// ============================================================================

/// Resolve ball contacts: damage Zorgonauts, consume the ball on any
/// contact that is not the thrower.
pub fn ball_collisions(
    mut commands: Commands,
    balls: Query<(Entity, &Ball, &CollidingEntities)>,
    mut zorgonauts: Query<&mut Vitals, With<Zorgonaut>>,
) {
    for (entity, ball, colliding) in balls.iter() {
        let mut consumed = false;

        for &other in colliding.iter() {
            if other == ball.thrower {
                continue;
            }
            consumed = true;

            if let Ok(mut vitals) = zorgonauts.get_mut(other) {
                vitals.take_damage(BALL_DAMAGE);
                info!(damage = BALL_DAMAGE, "ball hit a zorgonaut");
            }
        }

        if consumed {
            commands.entity(entity).despawn();
        }
    }
}
