//! # Ability Timing
//!
//! The two timing primitives behind every timed ability: a [`Cooldown`]
//! gates how often an ability may fire, a [`Discharge`] tracks the short
//! window in which a fired ability is still visibly live. The two are
//! deliberately independent: "on cooldown" and "currently discharging"
//! are different facts.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Cooldown
// ============================================================================

/// Minimum-interval gate between activations of an ability.
#[derive(Debug, Clone, Serialize, Deserialize, Reflect)]
pub struct Cooldown {
    /// Required interval between activations (s)
    pub duration: f32,
    /// Simulation time of the last successful activation
    pub last_used: Option<f32>,
}

impl Cooldown {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            last_used: None,
        }
    }

    pub fn ready(&self, now: f32) -> bool {
        match self.last_used {
            Some(last) => now - last > self.duration,
            None => true,
        }
    }

    /// Attempt to fire. A call inside the cooldown window is a rejected
    /// no-op: `false` is returned and `last_used` is left untouched.
    pub fn fire(&mut self, now: f32) -> bool {
        if !self.ready(now) {
            return false;
        }
        self.last_used = Some(now);
        true
    }

    /// Seconds until the gate reopens (zero when ready).
    pub fn remaining(&self, now: f32) -> f32 {
        match self.last_used {
            Some(last) => (self.duration - (now - last)).max(0.0),
            None => 0.0,
        }
    }
}

// ============================================================================
// Discharge
// ============================================================================

/// Short-lived "ability is currently live" window, set at fire time and
/// expiring after a fixed lifetime. Used for beam visuals and hit-test
/// liveness, never for gating.
#[derive(Debug, Clone, Serialize, Deserialize, Reflect)]
pub struct Discharge {
    /// How long a discharge stays live (s)
    pub lifetime: f32,
    /// Simulation time of the last trigger
    pub fired_at: Option<f32>,
}

impl Discharge {
    pub fn new(lifetime: f32) -> Self {
        Self {
            lifetime,
            fired_at: None,
        }
    }

    pub fn trigger(&mut self, now: f32) {
        self.fired_at = Some(now);
    }

    pub fn live(&self, now: f32) -> bool {
        match self.fired_at {
            Some(at) => now - at <= self.lifetime,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_fire_inside_cooldown_is_a_no_op() {
        let mut cooldown = Cooldown::new(2.0);
        assert!(cooldown.fire(10.0));

        // Inside the window: rejected, last_used untouched
        assert!(!cooldown.fire(11.5));
        assert_eq!(cooldown.last_used, Some(10.0));

        // Past the window: accepted
        assert!(cooldown.fire(12.1));
        assert_eq!(cooldown.last_used, Some(12.1));
    }

    #[test]
    fn cooldown_remaining_counts_down() {
        let mut cooldown = Cooldown::new(2.0);
        assert_eq!(cooldown.remaining(0.0), 0.0);
        cooldown.fire(1.0);
        assert!((cooldown.remaining(2.0) - 1.0).abs() < 1e-6);
        assert_eq!(cooldown.remaining(10.0), 0.0);
    }

    #[test]
    fn discharge_window_is_independent_of_cooldown() {
        let mut beam = Discharge::new(0.5);
        assert!(!beam.live(0.0));
        beam.trigger(1.0);
        assert!(beam.live(1.4));
        assert!(beam.live(1.5));
        assert!(!beam.live(1.51));
    }
}
