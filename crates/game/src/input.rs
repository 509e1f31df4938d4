//! Keyboard and mouse capture into the runtime's per-frame
//! [`ActionSnapshot`]. WASD / arrows move, Space jumps, Shift sprints,
//! E interacts; left click passes the ball, right click fires the
//! photon blaster, Escape pauses.

use avian3d::prelude::*;
use bevy::prelude::*;
use tracing::info;

use scrum_common::{ActionSnapshot, MatchState};

/// Rebuild the action snapshot from raw device state.
pub fn gather_actions(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut actions: ResMut<ActionSnapshot>,
) {
    actions.clear();

    // Screen convention: forward is negative y.
    let mut movement = Vec2::ZERO;
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        movement.y -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        movement.y += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        movement.x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        movement.x += 1.0;
    }
    actions.movement = movement;

    actions.jump = keyboard.pressed(KeyCode::Space);
    actions.sprint =
        keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    actions.interact = keyboard.just_pressed(KeyCode::KeyE);
    actions.pass = mouse.just_pressed(MouseButton::Left);
    actions.tackle = mouse.just_pressed(MouseButton::Right);
}

/// Escape freezes the match: runtime sets stop running and the physics
/// clock halts with them.
pub fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut match_state: ResMut<MatchState>,
    mut physics_time: ResMut<Time<Physics>>,
    mut virtual_time: ResMut<Time<Virtual>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }

    // Both clocks freeze so cooldowns and timers hold through a pause.
    if match_state.toggle_pause() {
        physics_time.pause();
        virtual_time.pause();
        info!("match paused");
    } else {
        physics_time.unpause();
        virtual_time.unpause();
        info!("match resumed");
    }
}
