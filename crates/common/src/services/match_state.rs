//! Match score, clock and pause state.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Running state of the current match.
#[derive(Resource, Reflect, Clone, Debug, Default, Serialize, Deserialize)]
#[reflect(Resource)]
pub struct MatchState {
    pub score: u32,
    /// Accumulated unpaused play time (s)
    pub game_time: f32,
    pub paused: bool,
    /// Latched once the player reaches the goal zone
    pub goal_reached: bool,
}

impl MatchState {
    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Run condition: the simulation advances only while unpaused.
pub fn match_running(match_state: Res<MatchState>) -> bool {
    !match_state.paused
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_and_pause() {
        let mut state = MatchState::default();
        state.add_score(7);
        assert_eq!(state.score, 7);
        assert!(state.toggle_pause());
        assert!(!state.toggle_pause());
    }

    #[test]
    fn reset_clears_the_whole_match() {
        let mut state = MatchState::default();
        state.add_score(1);
        state.game_time = 42.0;
        state.goal_reached = true;
        state.toggle_pause();

        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.game_time, 0.0);
        assert!(!state.goal_reached);
        // A restart must also leave the match unpaused
        assert!(!state.paused);
    }
}
