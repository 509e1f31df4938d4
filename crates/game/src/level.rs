//! # Kansas Field Level
//!
//! Level construction and presentation. The layout ships as a RON file
//! under `assets/levels/` and falls back to the built-in field when the
//! file is missing or malformed. Everything spawned here is either a
//! static physics body (ground, obstacles), a decal (crop circles), or
//! a fully rigged actor (player, Zorgonauts).

use anyhow::Context;
use avian3d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use scrum_common::{
    BallCarrier, GroundSensor, MatchState, Mobility, Player, Vitals,
};
use scrum_runtime::ball::{Ball, BALL_RADIUS};
use scrum_runtime::blaster::{Frozen, PhotonBlaster};
use scrum_runtime::character::PlayerController;
use scrum_runtime::enemy::{AttackFlash, BehaviorState, Zorgonaut};
use scrum_runtime::grounded::ground_caster;
use scrum_runtime::physics::RespawnPoint;

// ============================================================================
// Level Config
// ============================================================================

/// A flattened circle of pressed corn, purely decorative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropCircle {
    pub center: Vec2,
    pub radius: f32,
}

/// A static box the defenders and the player have to route around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec3,
    pub size: Vec3,
}

/// Declarative level layout, loaded from RON.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    pub field_size: Vec2,
    pub player_spawn: Vec3,
    pub enemy_spawns: Vec<Vec3>,
    pub crop_circles: Vec<CropCircle>,
    pub obstacles: Vec<Obstacle>,
    pub goal_position: Vec3,
    pub goal_radius: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            field_size: Vec2::new(100.0, 100.0),
            player_spawn: Vec3::new(-40.0, 2.0, 0.0),
            enemy_spawns: vec![
                Vec3::new(10.0, 1.0, 0.0),
                Vec3::new(20.0, 1.0, -10.0),
                Vec3::new(30.0, 1.0, 5.0),
            ],
            crop_circles: vec![
                CropCircle { center: Vec2::new(-15.0, -15.0), radius: 10.0 },
                CropCircle { center: Vec2::new(20.0, 10.0), radius: 15.0 },
                CropCircle { center: Vec2::new(0.0, -30.0), radius: 8.0 },
                CropCircle { center: Vec2::new(-25.0, 25.0), radius: 12.0 },
            ],
            obstacles: vec![
                Obstacle {
                    position: Vec3::new(-10.0, 1.0, -5.0),
                    size: Vec3::new(2.0, 2.0, 2.0),
                },
                Obstacle {
                    position: Vec3::new(15.0, 1.0, 15.0),
                    size: Vec3::new(3.0, 2.0, 1.0),
                },
                Obstacle {
                    position: Vec3::new(-15.0, 1.0, 20.0),
                    size: Vec3::new(1.0, 3.0, 1.0),
                },
            ],
            goal_position: Vec3::new(40.0, 0.5, 0.0),
            goal_radius: 7.0,
        }
    }
}

impl LevelConfig {
    fn load(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading level file {path}"))?;
        ron::de::from_str(&text).with_context(|| format!("parsing level file {path}"))
    }

    /// Load a layout, falling back to the built-in Kansas field.
    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!(path, "loaded level");
                config
            }
            Err(error) => {
                warn!(path, %error, "using built-in level");
                Self::default()
            }
        }
    }
}

/// The try zone. Crossing into its radius wins the match.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Goal {
    pub radius: f32,
}

// ============================================================================
// Construction
// ============================================================================

pub fn setup_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<LevelConfig>,
) {
    // === Cornfield ground ===
    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Cuboid::new(config.field_size.x, 1.0, config.field_size.y))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.82, 0.69, 0.21),
            perceptual_roughness: 0.95,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.5, 0.0),
        RigidBody::Static,
        Collider::cuboid(config.field_size.x, 1.0, config.field_size.y),
    ));

    // === Crop circles (decals, no physics) ===
    let pressed_corn = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.45, 0.15),
        perceptual_roughness: 1.0,
        ..default()
    });
    for (index, circle) in config.crop_circles.iter().enumerate() {
        commands.spawn((
            Name::new(format!("CropCircle{index}")),
            Mesh3d(meshes.add(Cylinder::new(circle.radius, 0.05))),
            MeshMaterial3d(pressed_corn.clone()),
            Transform::from_xyz(circle.center.x, 0.03, circle.center.y),
        ));
    }

    // === Obstacles ===
    let bale = materials.add(StandardMaterial {
        base_color: Color::srgb(0.6, 0.5, 0.3),
        ..default()
    });
    for (index, obstacle) in config.obstacles.iter().enumerate() {
        commands.spawn((
            Name::new(format!("Obstacle{index}")),
            Mesh3d(meshes.add(Cuboid::new(
                obstacle.size.x,
                obstacle.size.y,
                obstacle.size.z,
            ))),
            MeshMaterial3d(bale.clone()),
            Transform::from_translation(obstacle.position),
            RigidBody::Static,
            Collider::cuboid(obstacle.size.x, obstacle.size.y, obstacle.size.z),
        ));
    }

    // === Try zone ===
    commands.spawn((
        Name::new("Goal"),
        Goal { radius: config.goal_radius },
        Mesh3d(meshes.add(Cylinder::new(config.goal_radius, 0.2))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 0.85, 0.2, 0.5),
            emissive: LinearRgba::new(0.8, 0.6, 0.1, 1.0),
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_translation(config.goal_position),
    ));

    // === Player ===
    let player_collider = Collider::cuboid(1.0, 2.0, 1.0);
    commands.spawn((
        Name::new("Player"),
        Player,
        Mesh3d(meshes.add(Capsule3d::new(0.5, 1.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.2, 0.4, 0.9))),
        Transform::from_translation(config.player_spawn),
        RigidBody::Dynamic,
        ground_caster(&player_collider),
        player_collider,
        Mass(70.0),
        LockedAxes::ROTATION_LOCKED,
        LinearVelocity::default(),
        (
            Mobility::default(),
            Vitals::new(100.0),
            GroundSensor::default(),
            PlayerController::default(),
            PhotonBlaster::default(),
            BallCarrier::default(),
            RespawnPoint(config.player_spawn),
        ),
    ));

    // === Zorgonaut defenders ===
    for (index, spawn) in config.enemy_spawns.iter().enumerate() {
        spawn_zorgonaut(&mut commands, meshes.as_mut(), materials.as_mut(), index, *spawn);
    }

    info!(
        enemies = config.enemy_spawns.len(),
        obstacles = config.obstacles.len(),
        "level ready"
    );
}

fn spawn_zorgonaut(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    index: usize,
    spawn: Vec3,
) {
    let collider = Collider::cuboid(1.0, 2.5, 1.0);
    commands.spawn((
        Name::new(format!("Zorgonaut{index}")),
        Zorgonaut::new(spawn),
        Mesh3d(meshes.add(Capsule3d::new(0.5, 1.5))),
        MeshMaterial3d(materials.add(Color::srgb(0.5, 0.2, 0.7))),
        Transform::from_translation(spawn),
        RigidBody::Dynamic,
        ground_caster(&collider),
        collider,
        Mass(60.0),
        LockedAxes::ROTATION_LOCKED,
        LinearVelocity::default(),
        (Vitals::new(50.0), GroundSensor::default()),
    ));
}

// ============================================================================
// Presentation Systems
// ============================================================================

/// Victory check: the ball carrier inside the try zone wins.
pub fn check_goal(
    mut match_state: ResMut<MatchState>,
    player: Query<&Transform, With<Player>>,
    goal: Query<(&Transform, &Goal), Without<Player>>,
) {
    if match_state.goal_reached {
        return;
    }
    let Ok(player_transform) = player.single() else {
        return;
    };
    let Ok((goal_transform, goal)) = goal.single() else {
        return;
    };

    let offset = player_transform.translation - goal_transform.translation;
    let distance = Vec2::new(offset.x, offset.z).length();

    if distance < goal.radius {
        match_state.goal_reached = true;
        match_state.add_score(1);
        info!("try scored, match won");
    }
}

/// Accumulate match time while the match runs.
pub fn tick_match_clock(time: Res<Time>, mut match_state: ResMut<MatchState>) {
    match_state.game_time += time.delta_secs();
}

/// R restarts the match: score, clocks and the player reset, thrown
/// balls are removed, and the defenders respawn fresh. Works from any
/// state, including a tackled player or a scored try.
pub fn restart_match(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<LevelConfig>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut match_state: ResMut<MatchState>,
    mut physics_time: ResMut<Time<Physics>>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut player: Query<
        (&mut Transform, &mut Vitals, &mut BallCarrier, &mut LinearVelocity),
        With<Player>,
    >,
    zorgonauts: Query<Entity, With<Zorgonaut>>,
    balls: Query<Entity, With<Ball>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyR) {
        return;
    }

    match_state.reset();
    physics_time.unpause();
    virtual_time.unpause();

    if let Ok((mut transform, mut vitals, mut carrier, mut velocity)) = player.single_mut() {
        transform.translation = config.player_spawn;
        transform.rotation = Quat::IDENTITY;
        *vitals = Vitals::new(vitals.max_health);
        *carrier = BallCarrier::default();
        velocity.0 = Vec3::ZERO;
    }

    for entity in balls.iter() {
        commands.entity(entity).despawn();
    }
    for entity in zorgonauts.iter() {
        commands.entity(entity).despawn();
    }
    for (index, spawn) in config.enemy_spawns.iter().enumerate() {
        spawn_zorgonaut(&mut commands, meshes.as_mut(), materials.as_mut(), index, *spawn);
    }

    info!("match restarted");
}

/// Tint Zorgonauts by behavior: red while an attack flash is live,
/// icy blue while frozen or stunned, grey once dead, purple otherwise.
pub fn apply_state_tints(
    mut materials: ResMut<Assets<StandardMaterial>>,
    query: Query<(
        &Zorgonaut,
        &MeshMaterial3d<StandardMaterial>,
        Option<&AttackFlash>,
        Option<&Frozen>,
    )>,
) {
    for (zorgonaut, material, flash, frozen) in query.iter() {
        let Some(material) = materials.get_mut(&material.0) else {
            continue;
        };

        material.base_color = if flash.is_some() {
            Color::srgb(0.9, 0.15, 0.1)
        } else if frozen.is_some() || zorgonaut.is_stunned() {
            Color::srgb(0.4, 0.7, 1.0)
        } else if zorgonaut.is_dead() {
            Color::srgb(0.3, 0.3, 0.3)
        } else if zorgonaut.state == BehaviorState::Chase {
            Color::srgb(0.8, 0.3, 0.6)
        } else {
            Color::srgb(0.5, 0.2, 0.7)
        };
    }
}

/// The runtime spawns thrown balls as bare physics bodies; give each
/// one a mesh the first frame it exists.
pub fn dress_new_balls(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    query: Query<Entity, (With<Ball>, Without<Mesh3d>)>,
) {
    for entity in query.iter() {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Sphere::new(BALL_RADIUS))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.95, 0.9, 0.6),
                emissive: LinearRgba::new(0.6, 0.5, 0.2, 1.0),
                ..default()
            })),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_round_trips_through_ron() {
        let config = LevelConfig::default();
        let text = ron::ser::to_string(&config).unwrap();
        let parsed: LevelConfig = ron::de::from_str(&text).unwrap();
        assert_eq!(parsed.enemy_spawns, config.enemy_spawns);
        assert_eq!(parsed.goal_radius, config.goal_radius);
    }

    #[test]
    fn missing_level_file_falls_back_to_kansas() {
        let config = LevelConfig::load_or_default("assets/levels/does-not-exist.ron");
        assert_eq!(config.player_spawn, Vec3::new(-40.0, 2.0, 0.0));
        assert_eq!(config.enemy_spawns.len(), 3);
    }
}
