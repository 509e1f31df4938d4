//! Third-person follow camera. The rig trails the player at a fixed
//! world-space offset with exponential smoothing and keeps looking at
//! a point just above their feet.

use bevy::prelude::*;

use scrum_common::{Player, PlayerCamera};

pub fn spawn_camera(mut commands: Commands) {
    let rig = PlayerCamera::default();

    commands.spawn((
        Name::new("FollowCamera"),
        Camera3d::default(),
        Transform::from_translation(rig.offset).looking_at(Vec3::ZERO, Vec3::Y),
        rig,
    ));
}

pub fn follow_player(
    player: Query<&Transform, (With<Player>, Without<PlayerCamera>)>,
    mut camera: Query<(&mut Transform, &PlayerCamera), Without<Player>>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let Ok((mut camera_transform, rig)) = camera.single_mut() else {
        return;
    };

    let target = player_transform.translation + rig.offset;
    camera_transform.translation = camera_transform.translation.lerp(target, rig.smoothing);

    let look_at = player_transform.translation + Vec3::Y * rig.look_height;
    camera_transform.look_at(look_at, Vec3::Y);
}
