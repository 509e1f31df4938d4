//! # Scrum Common
//!
//! Shared types used across the Galactic Scrum crates.
//!
//! ## Modules
//!
//! - `classes`: actor building blocks (Vitals, Mobility, GroundSensor, BallCarrier)
//! - `abilities`: cooldown gates and discharge windows for timed abilities
//! - `services`: runtime resources (ActionSnapshot, Arena, MatchState)
//!
//! ## Architecture
//!
//! - **Classes**: ECS components that both the player and enemies are
//!   assembled from. All state-machine logic on them takes explicit
//!   `now`/`dt` parameters so it stays deterministic and testable.
//! - **Services**: world-level resources, read by the runtime crate each
//!   frame (input snapshot, arena physics bounds, match score/pause).

pub mod abilities;
pub mod classes;
pub mod services;

pub use abilities::{Cooldown, Discharge};
pub use classes::{BallCarrier, GroundSensor, Mobility, Vitals, BALL_RETURN_DELAY};
pub use services::arena::Arena;
pub use services::input::{ActionSnapshot, GameAction};
pub use services::match_state::MatchState;
pub use services::player::{Player, PlayerCamera};
