//! # Scrum Runtime
//!
//! The per-frame game logic for Galactic Scrum: player locomotion and
//! abilities, the Zorgonaut behavior state machine, grounded detection
//! and the timed side effects (stun expiry, freeze revert, corpse
//! despawn). Rendering, input capture and level construction live in
//! the app crate; everything here is headless and drives the physics
//! bodies only.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Scrum Runtime                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Sense                                                          │
//! │  └── GroundSensor <- downward shape-cast contact normals        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Act                                                            │
//! │  ├── Player: camera-relative velocity, yaw smoothing, jump,     │
//! │  │           pass / photon blaster / interact                   │
//! │  └── Zorgonauts: Patrol <-> Chase -> Attack, Stunned, Dead      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Resolve                                                        │
//! │  ├── Death handling, attack-flash expiry, freeze revert         │
//! │  ├── Ball collisions and timed despawns                         │
//! │  └── Arena gravity / bounds / speed clamping                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All timed effects are components on the affected entity, expired by
//! systems; despawning an entity takes its timers with it.

pub mod ball;
pub mod blaster;
pub mod character;
pub mod enemy;
pub mod grounded;
pub mod physics;
pub mod timers;

use bevy::prelude::*;

use scrum_common::services::match_state::match_running;
use scrum_common::{ActionSnapshot, Arena, MatchState};

// ============================================================================
// System Sets
// ============================================================================

/// Frame order: input capture -> ground sensing -> actor updates ->
/// timed-effect resolution. The app crate schedules its input gathering
/// into [`ScrumSet::Input`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrumSet {
    Input,
    Sense,
    Act,
    Resolve,
}

// ============================================================================
// Runtime Plugin
// ============================================================================

/// Core game-logic plugin. Expects Avian's `PhysicsPlugins` to be added
/// by the app.
pub struct ScrumRuntimePlugin;

impl Plugin for ScrumRuntimePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionSnapshot>()
            .init_resource::<Arena>()
            .init_resource::<MatchState>()
            .register_type::<ActionSnapshot>()
            .register_type::<Arena>()
            .register_type::<MatchState>()
            .register_type::<scrum_common::Vitals>()
            .register_type::<scrum_common::Mobility>()
            .register_type::<scrum_common::GroundSensor>()
            .register_type::<scrum_common::BallCarrier>()
            .register_type::<character::PlayerController>()
            .register_type::<blaster::PhotonBlaster>()
            .register_type::<blaster::Frozen>()
            .register_type::<enemy::Zorgonaut>()
            .register_type::<enemy::AttackFlash>()
            .register_type::<ball::Ball>()
            .register_type::<timers::DespawnAfter>()
            .register_type::<physics::RespawnPoint>()
            .configure_sets(
                Update,
                (
                    ScrumSet::Input,
                    ScrumSet::Sense.run_if(match_running),
                    ScrumSet::Act.run_if(match_running),
                    ScrumSet::Resolve.run_if(match_running),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                grounded::update_ground_sensors.in_set(ScrumSet::Sense),
            )
            .add_systems(
                Update,
                (
                    character::player_movement,
                    character::player_actions,
                    blaster::fire_photon_blaster,
                    enemy::update_zorgonauts,
                )
                    .in_set(ScrumSet::Act),
            )
            .add_systems(
                Update,
                (
                    enemy::handle_zorgonaut_death,
                    enemy::expire_attack_flashes,
                    blaster::thaw_frozen,
                    ball::ball_collisions,
                    timers::despawn_after,
                    physics::apply_arena_gravity,
                    physics::clamp_speeds,
                    physics::clamp_to_world_bounds,
                )
                    .in_set(ScrumSet::Resolve),
            );
    }
}
