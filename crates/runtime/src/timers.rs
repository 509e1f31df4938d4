//! Entity-attached deadlines. Anything transient (corpses, thrown
//! balls) carries a [`DespawnAfter`] instead of a fire-and-forget
//! callback, so the deadline pauses with the clock and dies with the
//! entity.

use bevy::prelude::*;

/// Despawn the entity once game time reaches `at`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct DespawnAfter {
    pub at: f32,
}

pub fn despawn_after(
    time: Res<Time>,
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
) {
    let now = time.elapsed_secs();

    for (entity, deadline) in query.iter() {
        if now >= deadline.at {
            commands.entity(entity).despawn();
        }
    }
}
