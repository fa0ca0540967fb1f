use bevy::prelude::*;

pub mod player_glow;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_camera, setup_lighting)).add_systems(
            Update,
            (
                player_glow::attach_player_glow,
                player_glow::update_player_glow,
            )
                .chain()
                .in_set(lighting::LightUpdateSet::Apply),
        );
    }
}

/// Fixed overview camera for the scene.
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 10.0, 16.0).looking_at(Vec3::new(0.0, 1.0, 0.0), Vec3::Y),
    ));
}

/// Dim night-time base lighting; the per-player glow supplies the rest.
fn setup_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.4, 0.45, 0.7),
        brightness: 40.0,
    });

    // Faint bluish moonlight so unlit geometry stays readable.
    commands.spawn((
        DirectionalLight {
            illuminance: 400.0,
            color: Color::srgb(0.5, 0.55, 0.8),
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));
}
