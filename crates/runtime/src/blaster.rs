//! # Photon Blaster
//!
//! The player's stun-based ranged ability. Firing is gated by a 2 s
//! cooldown; a fired beam stays visually live for 0.5 s (a separate
//! [`Discharge`] window, never reused as the cooldown indicator). The
//! hit-test is a single physics raycast from eye height along the
//! player's forward vector; the first body hit is frozen for 3 s with
//! its velocities cached, and a Zorgonaut hit is additionally stunned.

use avian3d::prelude::*;
use bevy::prelude::*;
use tracing::info;

use scrum_common::{ActionSnapshot, Cooldown, Discharge, GameAction, Player};

use crate::enemy::Zorgonaut;

pub const BLASTER_COOLDOWN: f32 = 2.0;
pub const BLASTER_RANGE: f32 = 20.0;
pub const BEAM_LIFETIME: f32 = 0.5;
pub const FREEZE_DURATION: f32 = 3.0;
/// Ray origin height above the player's feet.
pub const EYE_HEIGHT: f32 = 1.5;

// ============================================================================
// Components
// ============================================================================

/// Photon blaster state on the player.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PhotonBlaster {
    /// Firing gate
    pub trigger: Cooldown,
    /// Beam-is-live window, for visuals only
    pub beam: Discharge,
}

impl Default for PhotonBlaster {
    fn default() -> Self {
        Self {
            trigger: Cooldown::new(BLASTER_COOLDOWN),
            beam: Discharge::new(BEAM_LIFETIME),
        }
    }
}

/// Timed frozen state on a struck body. The cached velocities are
/// restored when the freeze expires; the component rides on the target
/// entity, so a despawn cancels the revert with it.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Frozen {
    pub until: f32,
    pub cached_linear: Vec3,
    pub cached_angular: Vec3,
}

// ============================================================================
// Systems
// ============================================================================

/// Fire the blaster on the tackle action: raycast, freeze, stun.
pub fn fire_photon_blaster(
    time: Res<Time>,
    actions: Res<ActionSnapshot>,
    spatial_query: SpatialQuery,
    mut commands: Commands,
    mut players: Query<(Entity, &Transform, &mut PhotonBlaster), With<Player>>,
    mut targets: Query<(&mut LinearVelocity, &mut AngularVelocity), Without<Frozen>>,
    mut zorgonauts: Query<&mut Zorgonaut>,
) {
    let now = time.elapsed_secs();

    let Ok((player, transform, mut blaster)) = players.single_mut() else {
        return;
    };

    if !actions.is_active(GameAction::Tackle) || !blaster.trigger.fire(now) {
        return;
    }
    blaster.beam.trigger(now);

    let origin = transform.translation + Vec3::Y * EYE_HEIGHT;
    let filter = SpatialQueryFilter::default().with_excluded_entities([player]);

    let Some(hit) = spatial_query.cast_ray(origin, transform.forward(), BLASTER_RANGE, true, &filter)
    else {
        info!("photon blaster fired, no hit");
        return;
    };

    if let Ok((mut linear, mut angular)) = targets.get_mut(hit.entity) {
        commands.entity(hit.entity).insert(Frozen {
            until: now + FREEZE_DURATION,
            cached_linear: linear.0,
            cached_angular: angular.0,
        });
        linear.0 = Vec3::ZERO;
        angular.0 = Vec3::ZERO;
    }

    if let Ok(mut zorgonaut) = zorgonauts.get_mut(hit.entity) {
        zorgonaut.stun(now);
        info!("zorgonaut stunned by photon blaster");
    }
}

/// Revert expired freezes, restoring the cached velocities.
pub fn thaw_frozen(
    time: Res<Time>,
    mut commands: Commands,
    mut query: Query<(Entity, &Frozen, &mut LinearVelocity, &mut AngularVelocity)>,
) {
    let now = time.elapsed_secs();

    for (entity, frozen, mut linear, mut angular) in query.iter_mut() {
        if now >= frozen.until {
            linear.0 = frozen.cached_linear;
            angular.0 = frozen.cached_angular;
            commands.entity(entity).remove::<Frozen>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beam_liveness_is_shorter_than_the_cooldown() {
        let mut blaster = PhotonBlaster::default();
        assert!(blaster.trigger.fire(1.0));
        blaster.beam.trigger(1.0);

        // Beam expires while the trigger is still gated
        assert!(blaster.beam.live(1.3));
        assert!(!blaster.beam.live(1.6));
        assert!(!blaster.trigger.ready(1.6));
    }
}
