//! # Actor Classes
//!
//! Component building blocks shared by the player and the Zorgonaut
//! defenders. Every method that advances state takes the simulation
//! time explicitly instead of reading an ambient clock.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Vitals
// ============================================================================

/// Health pool, clamped to `[0, max_health]`.
///
/// Reaching zero is a one-way transition: `take_damage` reports the
/// zero-crossing exactly once, further damage is a no-op.
#[derive(Component, Debug, Clone, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct Vitals {
    pub health: f32,
    pub max_health: f32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Vitals {
    pub fn new(max_health: f32) -> Self {
        Self {
            health: max_health,
            max_health,
        }
    }

    /// Take damage. Returns `true` only on the transition to dead.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.health <= 0.0 {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        self.health <= 0.0
    }

    /// Heal, clamped to `max_health`.
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

// ============================================================================
// Mobility
// ============================================================================

/// Locomotion tuning for an actor.
///
/// Horizontal velocity is written directly from these values each frame;
/// the vertical component belongs to the physics solver except on jumps.
#[derive(Component, Debug, Clone, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct Mobility {
    /// Base movement speed (units/s)
    pub move_speed: f32,
    /// Multiplier applied to `move_speed` while sprinting
    pub sprint_multiplier: f32,
    /// Vertical velocity set on jump (units/s)
    pub jump_force: f32,
    /// Minimum interval between jumps (s)
    pub jump_cooldown: f32,
    /// Yaw smoothing rate (1/s); higher turns faster
    pub rotation_speed: f32,
}

impl Default for Mobility {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            sprint_multiplier: 1.5,
            jump_force: 7.0,
            jump_cooldown: 0.3,
            rotation_speed: 10.0,
        }
    }
}

impl Mobility {
    pub fn effective_speed(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.move_speed * self.sprint_multiplier
        } else {
            self.move_speed
        }
    }
}

// ============================================================================
// GroundSensor
// ============================================================================

/// Contact normals steeper than this vertical component do not count as
/// ground (0.5 ~= a 60 degree slope).
pub const GROUND_NORMAL_MIN_Y: f32 = 0.5;

/// Grace window during which an actor stays grounded after the last
/// ground contact, absorbing single-frame gaps between the physics step
/// and the game-logic read.
pub const GROUNDED_GRACE: f32 = 0.1;

/// Event-driven grounded state with a grace window.
///
/// `observe` is fed one contact normal (oriented away from the actor's
/// own body) per hit; `refresh` expires stale contacts once per frame.
#[derive(Component, Debug, Clone, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct GroundSensor {
    pub grounded: bool,
    /// Simulation time of the last ground-normal contact
    pub last_grounded: f32,
}

impl Default for GroundSensor {
    fn default() -> Self {
        Self {
            grounded: false,
            last_grounded: f32::NEG_INFINITY,
        }
    }
}

impl GroundSensor {
    /// Record a contact normal. Marks the actor grounded iff the normal's
    /// vertical component exceeds [`GROUND_NORMAL_MIN_Y`].
    pub fn observe(&mut self, normal_y: f32, now: f32) {
        if normal_y > GROUND_NORMAL_MIN_Y {
            self.grounded = true;
            self.last_grounded = now;
        }
    }

    /// Expire the grounded flag once the last contact is older than
    /// [`GROUNDED_GRACE`].
    pub fn refresh(&mut self, now: f32) {
        if self.grounded && now - self.last_grounded > GROUNDED_GRACE {
            self.grounded = false;
        }
    }

    /// Optimistically clear grounded (on jump). Also forgets the last
    /// contact so the grace window cannot resurrect the flag.
    pub fn clear(&mut self) {
        self.grounded = false;
        self.last_grounded = f32::NEG_INFINITY;
    }
}

// ============================================================================
// BallCarrier
// ============================================================================

/// Time until a passed ball returns to the carrier (s).
pub const BALL_RETURN_DELAY: f32 = 5.0;

/// Ball possession state for the player.
#[derive(Component, Debug, Clone, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct BallCarrier {
    pub has_ball: bool,
    /// Simulation time at which a passed ball returns
    pub return_at: Option<f32>,
}

impl Default for BallCarrier {
    fn default() -> Self {
        Self {
            has_ball: true,
            return_at: None,
        }
    }
}

impl BallCarrier {
    /// Release the ball. Returns `true` if the carrier actually held it.
    pub fn pass(&mut self, now: f32) -> bool {
        if !self.has_ball {
            return false;
        }
        self.has_ball = false;
        self.return_at = Some(now + BALL_RETURN_DELAY);
        true
    }

    /// Advance the return timer. Returns `true` on the frame the ball
    /// comes back.
    pub fn tick(&mut self, now: f32) -> bool {
        match self.return_at {
            Some(at) if now >= at => {
                self.has_ball = true;
                self.return_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_clamps_at_zero_and_dies_once() {
        let mut vitals = Vitals::new(100.0);
        assert!(!vitals.take_damage(30.0));
        assert_eq!(vitals.health, 70.0);

        // Overkill clamps instead of going negative
        assert!(vitals.take_damage(150.0));
        assert_eq!(vitals.health, 0.0);

        // Further damage is a no-op on an already-dead actor
        assert!(!vitals.take_damage(10.0));
        assert_eq!(vitals.health, 0.0);
    }

    #[test]
    fn heal_clamps_at_max() {
        let mut vitals = Vitals::new(100.0);
        vitals.take_damage(40.0);
        vitals.heal(100.0);
        assert_eq!(vitals.health, 100.0);
    }

    #[test]
    fn ground_normal_threshold() {
        let mut sensor = GroundSensor::default();
        sensor.observe(0.4, 1.0);
        assert!(!sensor.grounded);
        sensor.observe(0.9, 1.0);
        assert!(sensor.grounded);
    }

    #[test]
    fn grounded_expires_after_grace_window() {
        let mut sensor = GroundSensor::default();
        sensor.observe(1.0, 1.0);

        // Inside the grace window the flag holds
        sensor.refresh(1.0 + GROUNDED_GRACE);
        assert!(sensor.grounded);

        // Past it, the flag drops
        sensor.refresh(1.0 + GROUNDED_GRACE + 0.01);
        assert!(!sensor.grounded);
    }

    #[test]
    fn clear_defeats_grace_window() {
        let mut sensor = GroundSensor::default();
        sensor.observe(1.0, 1.0);
        sensor.clear();
        sensor.refresh(1.0);
        assert!(!sensor.grounded);
    }

    #[test]
    fn ball_returns_after_delay() {
        let mut carrier = BallCarrier::default();
        assert!(carrier.pass(2.0));
        assert!(!carrier.has_ball);

        // Cannot pass without the ball
        assert!(!carrier.pass(3.0));

        assert!(!carrier.tick(2.0 + BALL_RETURN_DELAY - 0.1));
        assert!(carrier.tick(2.0 + BALL_RETURN_DELAY));
        assert!(carrier.has_ball);
    }
}
