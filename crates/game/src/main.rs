//! # Galactic Scrum
//!
//! A third-person action game: carry the energy ball across an alien
//! cornfield, stun Zorgonaut defenders with the photon blaster, and
//! reach the glowing try zone.
//!
//! The binary owns everything presentational: window, rendering,
//! input capture, camera, HUD and level construction. Game rules live
//! in `scrum-runtime`, shared data types in `scrum-common`.

mod camera;
mod hud;
mod input;
mod level;
mod lighting;

use avian3d::prelude::*;
use bevy::prelude::*;

use scrum_runtime::{ScrumRuntimePlugin, ScrumSet};

fn main() {
    tracing_subscriber::fmt::init();

    let level = level::LevelConfig::load_or_default(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/assets/levels/kansas.ron"
    ));

    App::new()
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Galactic Scrum".to_string(),
                    resolution: bevy::window::WindowResolution::new(1280, 720),
                    present_mode: bevy::window::PresentMode::Fifo,
                    ..default()
                }),
                ..default()
            }),
        )
        // Physics (Avian3D); the runtime mirrors Arena.gravity into this.
        .add_plugins(PhysicsPlugins::default())
        .insert_resource(Gravity(Vec3::new(0.0, -9.82, 0.0)))
        // Game rules
        .add_plugins(ScrumRuntimePlugin)
        .insert_resource(level)
        // World setup
        .add_systems(
            Startup,
            (
                level::setup_level,
                camera::spawn_camera,
                lighting::setup_lighting,
                hud::setup_hud,
            ),
        )
        // Input capture feeds the runtime's frame snapshot. The pause
        // toggle lives here too so it works while the match is frozen.
        .add_systems(
            Update,
            (input::gather_actions, input::toggle_pause).in_set(ScrumSet::Input),
        )
        // Rule-gated presentation
        .add_systems(
            Update,
            (
                level::check_goal,
                level::tick_match_clock,
                level::dress_new_balls,
            )
                .in_set(ScrumSet::Resolve),
        )
        // Camera, tints, HUD and the restart key keep running while
        // paused or after a tackle
        .add_systems(
            Update,
            (
                camera::follow_player.after(ScrumSet::Resolve),
                level::apply_state_tints.after(ScrumSet::Resolve),
                level::restart_match.after(ScrumSet::Resolve),
                hud::update_hud.after(ScrumSet::Resolve),
            ),
        )
        .run();
}
