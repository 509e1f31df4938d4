//! Field lighting: ambient fill, a directional sun, and a sky tint
//! picked from the machine's local clock so evening play gets an
//! evening field.

use bevy::prelude::*;
use chrono::Timelike;
use tracing::info;

/// Sky tint and sun intensity (lux) for a local hour of day.
pub fn sky_for_hour(hour: u32) -> (Color, f32) {
    match hour {
        6..=8 => (Color::srgb(0.9, 0.7, 0.5), 6_000.0),
        9..=16 => (Color::srgb(0.5, 0.75, 0.95), 10_000.0),
        17..=19 => (Color::srgb(0.85, 0.5, 0.35), 4_000.0),
        _ => (Color::srgb(0.05, 0.07, 0.15), 400.0),
    }
}

pub fn setup_lighting(mut commands: Commands) {
    let hour = chrono::Local::now().hour();
    let (sky, illuminance) = sky_for_hour(hour);
    info!(hour, "lighting for local time");

    commands.insert_resource(ClearColor(sky));
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: (illuminance / 50.0).max(60.0),
        ..default()
    });

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(30.0, 50.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn night_hours_are_dark() {
        let (_, night) = sky_for_hour(2);
        let (_, noon) = sky_for_hour(12);
        assert!(night < noon);

        let (_, midnight) = sky_for_hour(0);
        let (_, late) = sky_for_hour(23);
        assert_eq!(midnight, late);
    }

    #[test]
    fn dusk_sits_between_day_and_night() {
        let (_, day) = sky_for_hour(12);
        let (_, dusk) = sky_for_hour(18);
        let (_, night) = sky_for_hour(23);
        assert!(night < dusk && dusk < day);
    }
}
