use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use lighting::player::Player;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Player Light".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .add_plugins((
        lighting::LightingPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ))
    .add_systems(Startup, spawn_demo_scene)
    .add_systems(Update, orbit_players);

    app.run();
}

/// Demo walker path: players circle the origin so the glow visibly moves.
#[derive(Component)]
struct OrbitPath {
    radius: f32,
    angle: f32,
    speed: f32,
}

fn spawn_demo_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(40.0, 40.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.23, 0.25, 0.28),
            perceptual_roughness: 0.95,
            ..default()
        })),
    ));

    let body = meshes.add(Capsule3d::new(0.4, 1.0));
    let skin = materials.add(StandardMaterial {
        base_color: Color::srgb(0.75, 0.70, 0.65),
        ..default()
    });

    for (radius, angle, speed) in [(4.0, 0.0, 0.35), (7.0, 2.1, -0.25), (10.0, 4.2, 0.18)] {
        commands.spawn((
            Mesh3d(body.clone()),
            MeshMaterial3d(skin.clone()),
            Transform::from_xyz(angle.cos() * radius, 0.9, angle.sin() * radius),
            Player,
            OrbitPath {
                radius,
                angle,
                speed,
            },
        ));
    }
}

fn orbit_players(time: Res<Time>, mut players: Query<(&mut Transform, &mut OrbitPath)>) {
    for (mut transform, mut path) in players.iter_mut() {
        path.angle += path.speed * time.delta_secs();
        transform.translation.x = path.angle.cos() * path.radius;
        transform.translation.z = path.angle.sin() * path.radius;
    }
}
