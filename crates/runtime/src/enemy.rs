//! # Zorgonaut Behavior
//!
//! The enemy defender state machine: Patrol <-> Chase with a transient
//! cooldown-gated Attack, plus the Stunned and terminal Dead states.
//! The decision step is pure (explicit time, explicit random roll) so
//! the transition rules are directly testable; the Bevy system only
//! applies the resulting motion to the physics body.

use avian3d::prelude::*;
use bevy::prelude::*;
use tracing::{info, warn};

use scrum_common::{Cooldown, GroundSensor, Player, Vitals};

use crate::timers::DespawnAfter;

// ============================================================================
// Constants
// ============================================================================

/// Distance from a patrol point at which it counts as reached.
pub const PATROL_ARRIVE_RADIUS: f32 = 0.5;
/// Patrol points sit this far from the spawn point along x.
pub const PATROL_SPAN: f32 = 5.0;
/// Attack feedback tint duration (s).
pub const ATTACK_FLASH_DURATION: f32 = 0.2;
/// How long a dead Zorgonaut lingers before despawning (s).
pub const CORPSE_LINGER: f32 = 5.0;

// ============================================================================
// Behavior State
// ============================================================================

/// Mutually exclusive behavior mode. Attack is a transient event gated
/// by range and cooldown, not a state.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum BehaviorState {
    Patrol,
    Chase,
    Stunned { until: f32 },
    Dead { at: f32 },
}

/// One frame's worth of steering, produced by [`Zorgonaut::decide`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decision {
    pub motion: Option<Motion>,
    pub jump: bool,
    pub attack: bool,
}

/// Horizontal steering plus facing for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Horizontal velocity to write (x, z)
    pub velocity: Vec2,
    pub target_yaw: f32,
    pub rotation_speed: f32,
}

// ============================================================================
// Zorgonaut
// ============================================================================

/// Enemy defender. Spawned after the player exists; distance queries
/// resolve through the [`Player`] marker, never an ownership edge.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Zorgonaut {
    // === Tuning ===
    pub move_speed: f32,
    pub chase_speed: f32,
    pub jump_force: f32,
    pub attack_range: f32,
    pub view_distance: f32,
    pub damage: f32,
    pub stun_duration: f32,
    /// Yaw smoothing while patrolling
    pub patrol_rotation_speed: f32,
    /// Yaw smoothing while chasing (turns faster)
    pub chase_rotation_speed: f32,
    /// Per-frame chance to hop over obstacles while chasing
    pub jump_chance: f32,

    // === State ===
    pub state: BehaviorState,
    pub patrol_points: [Vec3; 2],
    pub current_patrol_target: usize,
    pub attack: Cooldown,
}

impl Zorgonaut {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            move_speed: 3.5,
            chase_speed: 5.0,
            jump_force: 6.0,
            attack_range: 2.0,
            view_distance: 15.0,
            damage: 10.0,
            stun_duration: 3.0,
            patrol_rotation_speed: 5.0,
            chase_rotation_speed: 8.0,
            jump_chance: 0.01,
            state: BehaviorState::Patrol,
            patrol_points: [
                Vec3::new(spawn.x - PATROL_SPAN, spawn.y, spawn.z),
                Vec3::new(spawn.x + PATROL_SPAN, spawn.y, spawn.z),
            ],
            current_patrol_target: 0,
            attack: Cooldown::new(1.5),
        }
    }

    pub fn is_dead(&self) -> bool {
        matches!(self.state, BehaviorState::Dead { .. })
    }

    pub fn is_stunned(&self) -> bool {
        matches!(self.state, BehaviorState::Stunned { .. })
    }

    /// External stun trigger (photon blaster hit). Idempotent: an
    /// already-stunned or dead Zorgonaut is left as is.
    pub fn stun(&mut self, now: f32) {
        if self.is_stunned() || self.is_dead() {
            return;
        }
        self.state = BehaviorState::Stunned {
            until: now + self.stun_duration,
        };
    }

    /// One frame of the behavior state machine.
    ///
    /// `jump_roll` is a uniform sample in `[0, 1)`, passed in so the
    /// decision stays deterministic under test.
    pub fn decide(
        &mut self,
        position: Vec3,
        player_position: Vec3,
        grounded: bool,
        now: f32,
        jump_roll: f32,
    ) -> Decision {
        let mut decision = Decision::default();

        match self.state {
            BehaviorState::Dead { .. } => return decision,
            BehaviorState::Stunned { until } => {
                if now <= until {
                    // Immobilized; no movement, no attacks.
                    return decision;
                }
                // Stun expired; fall through to the distance check.
                self.state = BehaviorState::Patrol;
            }
            _ => {}
        }

        let distance = position.distance(player_position);

        if distance < self.view_distance {
            self.state = BehaviorState::Chase;
            let to_player = Vec3::new(
                player_position.x - position.x,
                0.0,
                player_position.z - position.z,
            )
            .normalize_or_zero();

            decision.motion = Some(Motion {
                velocity: Vec2::new(to_player.x, to_player.z) * self.chase_speed,
                target_yaw: to_player.x.atan2(to_player.z),
                rotation_speed: self.chase_rotation_speed,
            });

            // Obstacle-avoidance heuristic, not pathfinding.
            decision.jump = grounded && jump_roll < self.jump_chance;
        } else {
            self.state = BehaviorState::Patrol;
            let target = self.patrol_points[self.current_patrol_target];
            let to_target = Vec3::new(target.x - position.x, 0.0, target.z - position.z);

            if to_target.length() < PATROL_ARRIVE_RADIUS {
                self.current_patrol_target = 1 - self.current_patrol_target;
            } else {
                let direction = to_target.normalize();
                decision.motion = Some(Motion {
                    velocity: Vec2::new(direction.x, direction.z) * self.move_speed,
                    target_yaw: direction.x.atan2(direction.z),
                    rotation_speed: self.patrol_rotation_speed,
                });
            }
        }

        // Attack is evaluated independently of chase/patrol.
        if distance < self.attack_range && self.attack.fire(now) {
            decision.attack = true;
        }

        decision
    }
}

/// Brief red tint after an attack lands.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct AttackFlash {
    pub until: f32,
}

// ============================================================================
// Systems
// ============================================================================

/// Per-frame Zorgonaut update: decide, steer, attack.
pub fn update_zorgonauts(
    time: Res<Time>,
    mut commands: Commands,
    mut warned_no_player: Local<bool>,
    mut player: Query<(&Transform, &mut Vitals), (With<Player>, Without<Zorgonaut>)>,
    mut query: Query<
        (
            Entity,
            &mut Transform,
            &mut Zorgonaut,
            &mut GroundSensor,
            &mut LinearVelocity,
        ),
        Without<Player>,
    >,
) {
    let dt = time.delta_secs();
    let now = time.elapsed_secs();

    // Enemies are spawned after the player; an absent player here means
    // the level is mid-teardown, so skip the frame.
    let Ok((player_transform, mut player_vitals)) = player.single_mut() else {
        if !*warned_no_player {
            warn!("zorgonaut update skipped: no player");
            *warned_no_player = true;
        }
        return;
    };
    *warned_no_player = false;

    for (entity, mut transform, mut zorgonaut, mut sensor, mut velocity) in query.iter_mut() {
        if zorgonaut.is_dead() {
            continue;
        }

        let decision = zorgonaut.decide(
            transform.translation,
            player_transform.translation,
            sensor.grounded,
            now,
            rand::random::<f32>(),
        );

        match decision.motion {
            Some(motion) => {
                velocity.x = motion.velocity.x;
                velocity.z = motion.velocity.y;

                let (current_yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
                let yaw = crate::character::smooth_yaw(
                    current_yaw,
                    motion.target_yaw,
                    motion.rotation_speed,
                    dt,
                );
                transform.rotation = Quat::from_rotation_y(yaw);
            }
            None => {
                // Stunned, or holding at a patrol point.
                velocity.x = 0.0;
                velocity.z = 0.0;
            }
        }

        if decision.jump {
            velocity.y = zorgonaut.jump_force;
            sensor.clear();
        }

        if decision.attack {
            let died = player_vitals.take_damage(zorgonaut.damage);
            commands.entity(entity).insert(AttackFlash {
                until: now + ATTACK_FLASH_DURATION,
            });
            info!(damage = zorgonaut.damage, "zorgonaut attacked player");
            if died {
                info!("player died");
            }
        }
    }
}

/// Transition a Zorgonaut to Dead when its vitals hit zero: velocity
/// zeroed, lying-down pose, corpse despawned after a fixed linger.
pub fn handle_zorgonaut_death(
    time: Res<Time>,
    mut commands: Commands,
    mut query: Query<
        (
            Entity,
            &Vitals,
            &mut Zorgonaut,
            &mut LinearVelocity,
            &mut Transform,
        ),
        Changed<Vitals>,
    >,
) {
    let now = time.elapsed_secs();

    for (entity, vitals, mut zorgonaut, mut velocity, mut transform) in query.iter_mut() {
        if vitals.is_alive() || zorgonaut.is_dead() {
            continue;
        }

        zorgonaut.state = BehaviorState::Dead { at: now };
        velocity.0 = Vec3::ZERO;
        transform.rotation = Quat::from_rotation_x(std::f32::consts::FRAC_PI_2);
        // A freeze on the corpse would restore velocity later; drop it.
        commands
            .entity(entity)
            .remove::<crate::blaster::Frozen>()
            .insert(DespawnAfter {
                at: now + CORPSE_LINGER,
            });
        info!("zorgonaut defeated");
    }
}

/// Drop expired attack flashes.
pub fn expire_attack_flashes(
    time: Res<Time>,
    mut commands: Commands,
    query: Query<(Entity, &AttackFlash)>,
) {
    let now = time.elapsed_secs();

    for (entity, flash) in query.iter() {
        if now >= flash.until {
            commands.entity(entity).remove::<AttackFlash>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAR: Vec3 = Vec3::new(100.0, 0.0, 0.0);

    fn zorgonaut() -> Zorgonaut {
        Zorgonaut::new(Vec3::ZERO)
    }

    #[test]
    fn spawns_patrolling_with_offset_points() {
        let enemy = Zorgonaut::new(Vec3::new(10.0, 1.0, 0.0));
        assert_eq!(enemy.state, BehaviorState::Patrol);
        assert_eq!(enemy.patrol_points[0], Vec3::new(5.0, 1.0, 0.0));
        assert_eq!(enemy.patrol_points[1], Vec3::new(15.0, 1.0, 0.0));
    }

    #[test]
    fn patrol_flips_target_within_arrive_radius() {
        let mut enemy = zorgonaut();
        assert_eq!(enemy.current_patrol_target, 0);

        // Standing within 0.5 of patrol point 0
        let near_point = enemy.patrol_points[0] + Vec3::new(0.3, 0.0, 0.0);
        let decision = enemy.decide(near_point, FAR, true, 0.0, 1.0);

        assert_eq!(enemy.current_patrol_target, 1);
        // The flip frame holds position
        assert!(decision.motion.is_none());

        // Next frame it steers toward the other point
        let decision = enemy.decide(near_point, FAR, true, 0.016, 1.0);
        let motion = decision.motion.expect("should steer toward point 1");
        assert!(motion.velocity.x > 0.0);
        assert!((motion.velocity.length() - enemy.move_speed).abs() < 1e-4);
    }

    #[test]
    fn chase_triggers_on_view_distance_crossings() {
        let mut enemy = zorgonaut();

        // Player at distance 20: patrol
        enemy.decide(Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0), true, 0.0, 1.0);
        assert_eq!(enemy.state, BehaviorState::Patrol);

        // Player moves to distance 10: chase on the same frame
        let decision = enemy.decide(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), true, 0.1, 1.0);
        assert_eq!(enemy.state, BehaviorState::Chase);
        let motion = decision.motion.expect("chasing should steer");
        assert!((motion.velocity.length() - enemy.chase_speed).abs() < 1e-4);
        assert_eq!(motion.rotation_speed, enemy.chase_rotation_speed);

        // Player retreats past the threshold: back to patrol
        enemy.decide(Vec3::ZERO, Vec3::new(16.0, 0.0, 0.0), true, 0.2, 1.0);
        assert_eq!(enemy.state, BehaviorState::Patrol);
    }

    #[test]
    fn attacks_once_per_cooldown_interval() {
        let mut enemy = zorgonaut();
        let player = Vec3::new(1.0, 0.0, 0.0);

        // First frame in range: attack
        assert!(enemy.decide(Vec3::ZERO, player, true, 0.0, 1.0).attack);

        // Held at distance 1 inside the cooldown: no further attacks
        assert!(!enemy.decide(Vec3::ZERO, player, true, 0.5, 1.0).attack);
        assert!(!enemy.decide(Vec3::ZERO, player, true, 1.5, 1.0).attack);

        // Past the 1.5 s interval: exactly one more
        assert!(enemy.decide(Vec3::ZERO, player, true, 1.6, 1.0).attack);
        assert!(!enemy.decide(Vec3::ZERO, player, true, 1.7, 1.0).attack);
    }

    #[test]
    fn stun_blocks_updates_then_reverts() {
        let mut enemy = zorgonaut();
        let player = Vec3::new(1.0, 0.0, 0.0);

        enemy.stun(10.0);
        assert!(enemy.is_stunned());

        // Movement and attack are no-ops for the stun duration
        let decision = enemy.decide(Vec3::ZERO, player, true, 11.0, 1.0);
        assert_eq!(decision, Decision::default());
        assert!(enemy.decide(Vec3::ZERO, player, true, 13.0, 1.0).motion.is_none());

        // Past 3 s it reverts on its own and resumes (player in range -> chase)
        let decision = enemy.decide(Vec3::ZERO, player, true, 13.01, 1.0);
        assert_eq!(enemy.state, BehaviorState::Chase);
        assert!(decision.motion.is_some());
    }

    #[test]
    fn stun_is_idempotent() {
        let mut enemy = zorgonaut();
        enemy.stun(10.0);
        let first = enemy.state;

        // Re-stunning must not extend the timer
        enemy.stun(12.0);
        assert_eq!(enemy.state, first);
    }

    #[test]
    fn dead_zorgonauts_do_nothing() {
        let mut enemy = zorgonaut();
        enemy.state = BehaviorState::Dead { at: 0.0 };

        let decision = enemy.decide(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), true, 5.0, 0.0);
        assert_eq!(decision, Decision::default());

        // Stun on a corpse is ignored
        enemy.stun(6.0);
        assert!(enemy.is_dead());
    }

    #[test]
    fn chase_jump_respects_roll_and_grounding() {
        let mut enemy = zorgonaut();
        let player = Vec3::new(5.0, 0.0, 0.0);

        // Roll under the chance while grounded: jump
        assert!(enemy.decide(Vec3::ZERO, player, true, 0.0, 0.005).jump);
        // Airborne: never
        assert!(!enemy.decide(Vec3::ZERO, player, false, 0.1, 0.005).jump);
        // Roll above the chance: no jump
        assert!(!enemy.decide(Vec3::ZERO, player, true, 0.2, 0.5).jump);
    }
}
