use crate::components::*;
use crate::game_logic::{ActorId, GameEvent, Positioned, Simulation};
use crate::plugins::simulation::{FrameSet, load_simulation};
use crate::resources::GameState;
use bevy::prelude::*;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(GameState::Playing),
            setup_scene.after(load_simulation),
        )
        .add_systems(
            Update,
            (
                despawn_removed_actors,
                spawn_effects,
                sync_camera,
                sync_enemies,
                sync_boss,
                sync_projectiles,
                fade_effects,
            )
                .chain()
                .in_set(FrameSet::Present)
                .run_if(resource_exists::<Simulation>),
        );
    }
}

/// Short-lived flash for shots and projectile impacts
#[derive(Component)]
struct Flash {
    timer: Timer,
}

#[derive(Resource)]
struct SceneAssets {
    projectile_mesh: Handle<Mesh>,
    projectile_material: Handle<StandardMaterial>,
    flash_mesh: Handle<Mesh>,
    impact_material: Handle<StandardMaterial>,
    muzzle_material: Handle<StandardMaterial>,
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    simulation: Res<Simulation>,
    camera_query: Query<&FirstPersonCamera>,
) {
    let level = simulation.level();

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(200.0, 200.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.2, 0.2),
            perceptual_roughness: 0.8,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, -40.0),
    ));

    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.53, 0.53, 0.53),
        perceptual_roughness: 0.7,
        ..default()
    });
    for wall in &level.walls {
        let size = wall.size();
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(wall.center),
            WallBlock,
        ));
    }
    info!("Spawned {} wall blocks", level.walls.len());

    let enemy_mesh = meshes.add(Cuboid::new(1.0, 2.0, 1.0));
    let enemy_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.0, 0.0),
        ..default()
    });
    for enemy in simulation.enemies() {
        commands.spawn((
            Mesh3d(enemy_mesh.clone()),
            MeshMaterial3d(enemy_material.clone()),
            Transform::from_translation(enemy.position() + Vec3::Y),
            EnemyAvatar { id: enemy.id() },
        ));
    }

    if let Some(boss) = simulation.boss() {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(3.0, 6.0, 3.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.5, 0.0, 0.5),
                emissive: LinearRgba::rgb(0.13, 0.0, 0.13),
                ..default()
            })),
            Transform::from_translation(boss.position() + Vec3::Y * 3.0),
            BossAvatar,
        ));
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        SceneLight,
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        affects_lightmapped_meshes: false,
    });

    if camera_query.is_empty() {
        let player = simulation.player();
        commands
            .spawn((
                Camera3d::default(),
                Transform::from_translation(player.position()).with_rotation(player.orientation()),
                FirstPersonCamera,
            ))
            .with_children(|camera| {
                // Gun model, drawn in camera space
                camera.spawn((
                    Mesh3d(meshes.add(Cuboid::new(0.1, 0.1, 0.5))),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: Color::srgb(0.27, 0.27, 0.27),
                        ..default()
                    })),
                    Transform::from_xyz(0.3, -0.3, -0.5),
                ));
            });
    }

    commands.insert_resource(SceneAssets {
        projectile_mesh: meshes.add(Sphere::new(0.3)),
        projectile_material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.0, 1.0),
            emissive: LinearRgba::rgb(0.8, 0.0, 0.8),
            ..default()
        }),
        flash_mesh: meshes.add(Sphere::new(0.15)),
        impact_material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.0, 0.0),
            emissive: LinearRgba::rgb(1.0, 0.2, 0.0),
            ..default()
        }),
        muzzle_material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 1.0, 0.0),
            emissive: LinearRgba::rgb(1.0, 1.0, 0.2),
            ..default()
        }),
    });
}

fn despawn_removed_actors(
    mut commands: Commands,
    mut events: EventReader<GameEvent>,
    enemy_query: Query<(Entity, &EnemyAvatar)>,
    boss_query: Query<Entity, With<BossAvatar>>,
) {
    for event in events.read() {
        let GameEvent::ActorRemoved { target } = event else {
            continue;
        };
        match target {
            ActorId::Enemy(id) => {
                for (entity, avatar) in &enemy_query {
                    if avatar.id == *id {
                        commands.entity(entity).despawn();
                    }
                }
            }
            ActorId::Boss => {
                for entity in &boss_query {
                    commands.entity(entity).despawn();
                }
            }
            ActorId::Player => {}
        }
    }
}

fn spawn_effects(
    mut commands: Commands,
    mut events: EventReader<GameEvent>,
    assets: Option<Res<SceneAssets>>,
) {
    let Some(assets) = assets else {
        return;
    };
    for event in events.read() {
        let (position, material) = match event {
            GameEvent::WeaponFired { origin, .. } => (*origin, assets.muzzle_material.clone()),
            GameEvent::ProjectileImpact { position, .. } => (*position, assets.impact_material.clone()),
            _ => continue,
        };
        commands.spawn((
            Mesh3d(assets.flash_mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(position),
            Flash {
                timer: Timer::from_seconds(0.2, TimerMode::Once),
            },
        ));
    }
}

fn sync_camera(
    simulation: Res<Simulation>,
    mut camera_query: Query<&mut Transform, With<FirstPersonCamera>>,
) {
    let player = simulation.player();
    for mut transform in &mut camera_query {
        transform.translation = player.position();
        transform.rotation = player.orientation();
    }
}

fn sync_enemies(
    simulation: Res<Simulation>,
    mut enemy_query: Query<(&EnemyAvatar, &mut Transform)>,
) {
    for (avatar, mut transform) in &mut enemy_query {
        let Some(enemy) = simulation.enemies().iter().find(|e| e.id() == avatar.id) else {
            continue;
        };
        transform.translation = enemy.position() + Vec3::Y;
        if let Some(progress) = enemy.death_progress() {
            // Topple and shrink over the death animation
            transform.rotation = Quat::from_rotation_x(progress * std::f32::consts::FRAC_PI_2);
            transform.scale = Vec3::splat((1.0 - progress).max(0.01));
        }
    }
}

fn sync_boss(simulation: Res<Simulation>, mut boss_query: Query<&mut Transform, With<BossAvatar>>) {
    let Some(boss) = simulation.boss() else {
        return;
    };
    for mut transform in &mut boss_query {
        transform.translation = boss.position() + Vec3::Y * 3.0;
        let to_player = simulation.player().position() - boss.position();
        transform.rotation = Quat::from_rotation_y(to_player.x.atan2(to_player.z));

        let mut scale = if boss.is_enraged() { 1.2 } else { 1.0 };
        if boss.is_winding_up() {
            scale *= 1.1;
        }
        if let Some(progress) = boss.death_progress() {
            scale *= (1.0 - progress).max(0.01);
        }
        transform.scale = Vec3::splat(scale);
    }
}

/// Keep one sphere per live projectile, reusing entities between frames
fn sync_projectiles(
    mut commands: Commands,
    simulation: Res<Simulation>,
    assets: Option<Res<SceneAssets>>,
    mut projectile_query: Query<(Entity, &mut Transform), With<ProjectileAvatar>>,
) {
    let Some(assets) = assets else {
        return;
    };
    let projectiles = simulation.boss().map(|boss| boss.projectiles()).unwrap_or_default();

    let mut avatars = projectile_query.iter_mut();
    for projectile in projectiles {
        match avatars.next() {
            Some((_, mut transform)) => transform.translation = projectile.position(),
            None => {
                commands.spawn((
                    Mesh3d(assets.projectile_mesh.clone()),
                    MeshMaterial3d(assets.projectile_material.clone()),
                    Transform::from_translation(projectile.position()),
                    ProjectileAvatar,
                ));
            }
        }
    }
    for (entity, _) in avatars {
        commands.entity(entity).despawn();
    }
}

fn fade_effects(mut commands: Commands, time: Res<Time>, mut flashes: Query<(Entity, &mut Flash)>) {
    for (entity, mut flash) in &mut flashes {
        if flash.timer.tick(time.delta()).finished() {
            commands.entity(entity).despawn();
        }
    }
}
