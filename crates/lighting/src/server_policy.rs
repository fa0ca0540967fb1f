//! Server-scoped light policy.
//!
//! The session owner controls the shared base color, the brightness cap and
//! the normalization flag. Connected clients receive this state from the host
//! and can only go *dimmer* through their own preference (see
//! `client_preference`); remote attempts to edit it are rejected at the gate
//! in `remote`. Persists via `Saveable` (bitcode serialization).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::Saveable;

/// Upper bound of the brightness integer on both configuration sides.
pub const BRIGHTNESS_MAX: u32 = 1000;

/// Server-side light settings, mutable only by the session owner.
///
/// `brightness` is an integer 0-1000 mapped linearly to a [0, 1] intensity
/// multiplier. 1000 is roughly a torch, 200 a dim glow.
#[derive(
    Resource, Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode,
)]
pub struct ServerLightPolicy {
    /// Brightness cap, 0-1000. Clients can choose a lower value, never a higher one.
    pub brightness: u32,
    /// Base color, red channel (0-1).
    pub red: f32,
    /// Base color, green channel (0-1).
    pub green: f32,
    /// Base color, blue channel (0-1).
    pub blue: f32,
    /// Rescale the base color so its largest channel is 1 before the
    /// brightness scale is applied. Ex: (0, 0.25, 0.5) -> (0, 0.5, 1).
    pub normalize: bool,
}

impl Default for ServerLightPolicy {
    fn default() -> Self {
        Self {
            brightness: 200,
            red: 0.59,
            green: 0.52,
            blue: 0.70,
            normalize: true,
        }
    }
}

impl ServerLightPolicy {
    /// The configured base color as a vector.
    pub fn base_color(&self) -> Vec3 {
        Vec3::new(self.red, self.green, self.blue)
    }

    /// Set brightness, clamped to `0..=BRIGHTNESS_MAX`.
    pub fn set_brightness(&mut self, brightness: u32) {
        self.brightness = brightness.min(BRIGHTNESS_MAX);
    }

    /// Set the red channel, clamped to `[0.0, 1.0]`.
    pub fn set_red(&mut self, red: f32) {
        self.red = red.clamp(0.0, 1.0);
    }

    /// Set the green channel, clamped to `[0.0, 1.0]`.
    pub fn set_green(&mut self, green: f32) {
        self.green = green.clamp(0.0, 1.0);
    }

    /// Set the blue channel, clamped to `[0.0, 1.0]`.
    pub fn set_blue(&mut self, blue: f32) {
        self.blue = blue.clamp(0.0, 1.0);
    }

    /// Toggle brightness normalization of the base color.
    pub fn set_normalize(&mut self, normalize: bool) {
        self.normalize = normalize;
    }
}

impl Saveable for ServerLightPolicy {
    const SAVE_KEY: &'static str = "server_light_policy";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        // Always save: the owner's choice of the default is still a choice.
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

pub struct ServerPolicyPlugin;

impl Plugin for ServerPolicyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ServerLightPolicy>();

        // Register for save/load via the SaveableRegistry.
        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<ServerLightPolicy>();
    }
}
