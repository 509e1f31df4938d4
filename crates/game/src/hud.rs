//! Minimal in-match HUD: health, score with match clock, blaster
//! readiness. Plain absolute-positioned text nodes, updated in place.

use bevy::prelude::*;

use scrum_common::{MatchState, Vitals};
use scrum_runtime::blaster::PhotonBlaster;

#[derive(Component)]
pub struct HealthReadout;

#[derive(Component)]
pub struct ScoreReadout;

#[derive(Component)]
pub struct BlasterReadout;

pub fn setup_hud(mut commands: Commands) {
    commands.spawn((
        HealthReadout,
        Text::new("HP 100"),
        TextFont::from_font_size(24.0),
        TextColor(Color::srgb(0.9, 0.3, 0.3)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(20.0),
            ..default()
        },
    ));

    commands.spawn((
        ScoreReadout,
        Text::new("Score 0   0:00"),
        TextFont::from_font_size(24.0),
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(50.0),
            ..default()
        },
    ));

    commands.spawn((
        BlasterReadout,
        Text::new("Blaster READY"),
        TextFont::from_font_size(24.0),
        TextColor(Color::srgb(0.4, 0.8, 1.0)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(80.0),
            ..default()
        },
    ));
}

/// Blaster readout line: a live beam reports FIRING, a gated trigger
/// counts down, otherwise READY.
pub fn blaster_label(blaster: &PhotonBlaster, now: f32) -> String {
    if blaster.beam.live(now) {
        return "Blaster FIRING".to_string();
    }
    let remaining = blaster.trigger.remaining(now);
    if remaining > 0.0 {
        format!("Blaster {remaining:.1}s")
    } else {
        "Blaster READY".to_string()
    }
}

pub fn update_hud(
    time: Res<Time>,
    match_state: Res<MatchState>,
    player: Query<(&Vitals, &PhotonBlaster)>,
    mut health: Query<&mut Text, (With<HealthReadout>, Without<ScoreReadout>, Without<BlasterReadout>)>,
    mut score: Query<&mut Text, (With<ScoreReadout>, Without<HealthReadout>, Without<BlasterReadout>)>,
    mut blaster: Query<&mut Text, (With<BlasterReadout>, Without<HealthReadout>, Without<ScoreReadout>)>,
) {
    let Ok((vitals, photon_blaster)) = player.single() else {
        return;
    };

    if let Ok(mut text) = health.single_mut() {
        if vitals.is_alive() {
            text.0 = format!("HP {:.0}", vitals.health);
        } else {
            text.0 = "TACKLED - R to restart".to_string();
        }
    }

    if let Ok(mut text) = score.single_mut() {
        let minutes = (match_state.game_time / 60.0) as u32;
        let seconds = match_state.game_time as u32 % 60;
        let mut line = format!("Score {}   {minutes}:{seconds:02}", match_state.score);
        if match_state.goal_reached {
            line.push_str("   TRY!");
        } else if match_state.paused {
            line.push_str("   PAUSED");
        }
        text.0 = line;
    }

    if let Ok(mut text) = blaster.single_mut() {
        text.0 = blaster_label(photon_blaster, time.elapsed_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blaster_label_reports_firing_then_cooldown_then_ready() {
        let mut blaster = PhotonBlaster::default();
        assert_eq!(blaster_label(&blaster, 0.0), "Blaster READY");

        blaster.trigger.fire(1.0);
        blaster.beam.trigger(1.0);

        // Beam live for its 0.5 s window
        assert_eq!(blaster_label(&blaster, 1.3), "Blaster FIRING");

        // Beam expired, trigger still gated
        assert_eq!(blaster_label(&blaster, 2.0), "Blaster 1.0s");

        // Past the 2 s cooldown
        assert_eq!(blaster_label(&blaster, 3.1), "Blaster READY");
    }
}
