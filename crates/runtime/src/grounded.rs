//! # Grounded Detection
//!
//! Contact-normal driven grounded state. A downward shape cast attached
//! to each actor reports its hits every physics step; any hit whose
//! normal (oriented away from the actor) is close enough to vertical
//! marks the actor grounded. The flag then survives a short grace
//! window so a jump input issued a frame after leaving the ground still
//! succeeds.

use avian3d::prelude::*;
use bevy::prelude::*;

use scrum_common::GroundSensor;

/// Reach of the downward ground cast below the collider (units).
pub const GROUND_CAST_DISTANCE: f32 = 0.2;

/// Build the downward shape caster for an actor collider. The cast
/// shape is shrunk slightly so it cannot snag on walls the collider is
/// flush against.
pub fn ground_caster(collider: &Collider) -> ShapeCaster {
    let mut caster_shape = collider.clone();
    caster_shape.set_scale(Vec3::ONE * 0.99, 10);

    ShapeCaster::new(caster_shape, Vec3::ZERO, Quat::default(), Dir3::NEG_Y)
        .with_max_distance(GROUND_CAST_DISTANCE)
}

/// Feed shape-cast contact normals into each actor's [`GroundSensor`]
/// and expire stale contacts.
pub fn update_ground_sensors(
    time: Res<Time>,
    mut query: Query<(&ShapeHits, &Rotation, &mut GroundSensor)>,
) {
    let now = time.elapsed_secs();

    for (hits, rotation, mut sensor) in query.iter_mut() {
        for hit in hits.iter() {
            // normal2 is reported on the struck body, pointing at the
            // actor; flip it into the away-from-actor orientation.
            let normal = rotation.0 * -hit.normal2;
            sensor.observe(normal.y, now);
        }
        sensor.refresh(now);
    }
}
