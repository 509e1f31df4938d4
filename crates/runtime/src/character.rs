//! # Player Character Controller
//!
//! Reads the frame's [`ActionSnapshot`] and drives the player's physics
//! body: camera-relative horizontal velocity (hard stop on no input),
//! shortest-arc yaw smoothing toward the move direction, cooldown-gated
//! jumping, and the pass / interact actions. The photon blaster has its
//! own system in [`crate::blaster`].

use avian3d::prelude::*;
use bevy::prelude::*;
use tracing::{debug, info};

use scrum_common::{
    ActionSnapshot, BallCarrier, Cooldown, GameAction, GroundSensor, Mobility, Player,
    PlayerCamera, Vitals,
};

use crate::ball;

// ============================================================================
// Components
// ============================================================================

/// Runtime state for the player controller.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PlayerController {
    /// Jump gate (0.3 s between jumps)
    pub jump: Cooldown,
    /// Sprint state this frame (for HUD/animation)
    pub sprinting: bool,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self {
            jump: Cooldown::new(Mobility::default().jump_cooldown),
            sprinting: false,
        }
    }
}

// ============================================================================
// Pure helpers
// ============================================================================

/// Map raw movement input into a camera-relative world-space direction.
///
/// Forward is the camera look direction with its vertical component
/// zeroed and renormalized; right is the up-axis cross forward. Input y
/// is the screen-forward axis (forward negative).
pub fn camera_relative_direction(camera_forward: Vec3, input: Vec2) -> Vec3 {
    let flat = Vec3::new(camera_forward.x, 0.0, camera_forward.z);
    if flat.length_squared() < 1e-6 {
        return Vec3::ZERO;
    }
    let forward = flat.normalize();
    let right = Vec3::Y.cross(forward).normalize();

    (forward * -input.y + right * input.x).normalize_or_zero()
}

/// Interpolate yaw toward a target along the shortest arc by
/// `min(rotation_speed * dt, 1)`.
pub fn smooth_yaw(current: f32, target: f32, rotation_speed: f32, dt: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let diff = (target - current + PI).rem_euclid(TAU) - PI;
    current + diff * (rotation_speed * dt).min(1.0)
}

// ============================================================================
// Systems
// ============================================================================

/// Per-frame locomotion: velocity assignment, facing, jump.
pub fn player_movement(
    time: Res<Time>,
    actions: Res<ActionSnapshot>,
    camera_query: Query<&Transform, (With<PlayerCamera>, Without<Player>)>,
    mut query: Query<
        (
            &Mobility,
            &Vitals,
            &mut PlayerController,
            &mut GroundSensor,
            &mut LinearVelocity,
            &mut Transform,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    let now = time.elapsed_secs();

    let Ok(camera_transform) = camera_query.single() else {
        return;
    };
    let Ok((mobility, vitals, mut controller, mut sensor, mut velocity, mut transform)) =
        query.single_mut()
    else {
        return;
    };

    // Dead players don't steer; gravity still applies.
    if !vitals.is_alive() {
        velocity.x = 0.0;
        velocity.z = 0.0;
        return;
    }

    let input = actions.movement_direction();
    if input != Vec2::ZERO {
        controller.sprinting = actions.is_active(GameAction::Sprint);
        let speed = mobility.effective_speed(controller.sprinting);
        let direction = camera_relative_direction(*camera_transform.forward(), input);
        let target = direction * speed;

        // Direct velocity write: vertical component stays with the
        // solver so gravity and jump arcs are unaffected.
        velocity.x = target.x;
        velocity.z = target.z;

        if direction.length_squared() > 0.01 {
            let target_yaw = direction.x.atan2(direction.z);
            let (current_yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
            let yaw = smooth_yaw(current_yaw, target_yaw, mobility.rotation_speed, dt);
            transform.rotation = Quat::from_rotation_y(yaw);
        }
    } else {
        // Hard stop, no deceleration curve.
        controller.sprinting = false;
        velocity.x = 0.0;
        velocity.z = 0.0;
    }

    if actions.is_active(GameAction::Jump) && sensor.grounded && controller.jump.fire(now) {
        velocity.y = mobility.jump_force;
        // Optimistic clear; the ground cast corrects it on landing.
        sensor.clear();
        debug!("player jumped");
    }
}

/// Pass, interact and the ball return timer.
pub fn player_actions(
    time: Res<Time>,
    actions: Res<ActionSnapshot>,
    mut commands: Commands,
    mut query: Query<(Entity, &Transform, &mut BallCarrier), With<Player>>,
) {
    let now = time.elapsed_secs();

    let Ok((player, transform, mut carrier)) = query.single_mut() else {
        return;
    };

    if actions.is_active(GameAction::Pass) && carrier.pass(now) {
        ball::spawn_thrown_ball(&mut commands, player, transform, now);
        info!("player passed the ball");
    }

    if carrier.tick(now) {
        info!("ball returned to player");
    }

    if actions.is_active(GameAction::Interact) {
        debug!("player interacted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn forward_input_follows_camera() {
        // Camera looking down -z with some pitch; pitch must be ignored
        let camera_forward = Vec3::new(0.0, -0.5, -1.0);
        let direction = camera_relative_direction(camera_forward, Vec2::new(0.0, -1.0));
        assert!((direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn strafe_input_is_perpendicular_to_camera() {
        let camera_forward = Vec3::new(0.0, 0.0, -1.0);
        let direction = camera_relative_direction(camera_forward, Vec2::new(1.0, 0.0));
        assert!(direction.dot(Vec3::new(0.0, 0.0, -1.0)).abs() < 1e-5);
        assert!((direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn straight_down_camera_yields_no_direction() {
        let direction = camera_relative_direction(Vec3::NEG_Y, Vec2::new(0.0, -1.0));
        assert_eq!(direction, Vec3::ZERO);
    }

    #[test]
    fn yaw_smoothing_takes_shortest_arc() {
        // From just below +pi to just above -pi: shortest path crosses the seam
        let yaw = smooth_yaw(PI - 0.1, -PI + 0.1, 10.0, 0.01);
        assert!(yaw > PI - 0.1);
    }

    #[test]
    fn yaw_interpolation_factor_is_clamped() {
        // Huge dt snaps straight to the target, never overshoots
        let yaw = smooth_yaw(0.0, FRAC_PI_2, 10.0, 10.0);
        assert!((yaw - FRAC_PI_2).abs() < 1e-6);
    }
}
