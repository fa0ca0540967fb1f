//! Client-scoped light preference.
//!
//! Each running client owns one of these. The only knob is a brightness
//! integer; the base color always comes from the current server policy, so
//! the derived value here is recomputed whenever either side changes. A
//! client may always change its own preference, but the dimmer of the two
//! configured brightness values is what actually renders.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::server_policy::BRIGHTNESS_MAX;
use crate::Saveable;

/// Client-side light settings.
///
/// `brightness` is an integer 0-1000 mapped linearly to a [0, 1] intensity
/// multiplier. It takes effect only when it is lower than the server's.
#[derive(
    Resource, Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode,
)]
pub struct ClientLightPreference {
    /// Preferred brightness, 0-1000. Cannot exceed the server's brightness
    /// in effect; the resolver picks the dimmer of the two.
    pub brightness: u32,
}

impl Default for ClientLightPreference {
    fn default() -> Self {
        Self { brightness: 1000 }
    }
}

impl ClientLightPreference {
    /// Set brightness, clamped to `0..=BRIGHTNESS_MAX`.
    pub fn set_brightness(&mut self, brightness: u32) {
        self.brightness = brightness.min(BRIGHTNESS_MAX);
    }
}

impl Saveable for ClientLightPreference {
    const SAVE_KEY: &'static str = "client_light_preference";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

pub struct ClientPreferencePlugin;

impl Plugin for ClientPreferencePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClientLightPreference>();

        // Register for save/load via the SaveableRegistry.
        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<ClientLightPreference>();
    }
}
