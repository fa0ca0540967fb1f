//! Player marker shared between gameplay and rendering.

use bevy::prelude::*;

/// Marker for entities that receive the per-player light contribution.
/// Gameplay code tags its player entities; the rendering crate attaches and
/// drives the actual glow light.
#[derive(Component, Debug, Default)]
pub struct Player;
