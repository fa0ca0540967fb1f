//! Applies the resolved per-player light to player entities.
//!
//! Every `Player` gets a shadowless child `PointLight`. The per-frame update
//! only copies the precomputed contribution into that light; all derivation
//! happened at settings-change time in the `lighting` crate, so this path
//! stays allocation-free.

use bevy::prelude::*;

use lighting::player::Player;
use lighting::resolved::ResolvedPlayerLight;

/// Marker for the glow light entity parented to a player.
#[derive(Component, Debug, Default)]
pub struct PlayerGlow;

/// Luminous intensity of the glow; the resolved color carries the configured
/// brightness, so this stays constant.
const GLOW_INTENSITY: f32 = 80_000.0;
/// World-space reach of the glow.
const GLOW_RANGE: f32 = 14.0;
/// Height of the light above the player's feet.
const GLOW_HEIGHT: f32 = 1.4;

/// Attach a glow light to every newly added player. It starts dark; the
/// first `update_player_glow` after it spawns copies the resolved value in.
pub fn attach_player_glow(mut commands: Commands, players: Query<Entity, Added<Player>>) {
    for entity in &players {
        commands.entity(entity).with_children(|parent| {
            parent.spawn((
                PointLight {
                    color: Color::BLACK,
                    intensity: 0.0,
                    range: GLOW_RANGE,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_xyz(0.0, GLOW_HEIGHT, 0.0),
                PlayerGlow,
            ));
        });
    }
}

/// Per-frame: forward the precomputed contribution into every glow light.
/// The dimmer configured side wins; a disabled winner switches the glow off.
pub fn update_player_glow(
    resolved: Res<ResolvedPlayerLight>,
    mut glows: Query<&mut PointLight, With<PlayerGlow>>,
) {
    match resolved.contribution() {
        Some(color) => {
            for mut glow in glows.iter_mut() {
                glow.color = Color::linear_rgb(color.x, color.y, color.z);
                glow.intensity = GLOW_INTENSITY;
            }
        }
        None => {
            for mut glow in glows.iter_mut() {
                glow.intensity = 0.0;
            }
        }
    }
}
