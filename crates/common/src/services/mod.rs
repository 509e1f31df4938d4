//! Service resources: world-level state read by the runtime each frame.

pub mod arena;
pub mod input;
pub mod match_state;
pub mod player;

pub use arena::Arena;
pub use input::{ActionSnapshot, GameAction};
pub use match_state::MatchState;
pub use player::{Player, PlayerCamera};
