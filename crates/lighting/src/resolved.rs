//! Derived light values and the per-frame resolver.
//!
//! Both configuration sides keep a cached `(brightness, color, enabled)`
//! tuple that is recomputed when settings change, never per frame. The
//! per-frame path compares two precomputed integers and forwards a
//! precomputed vector; it does no math and no allocation.
//!
//! The client's derived value depends on the server's base color, so a server
//! change recomputes both sides. Each tuple is replaced as a whole value, so
//! a reader can never observe a half-updated color.

use bevy::ecs::schedule::common_conditions::resource_exists_and_changed;
use bevy::prelude::*;

use crate::client_preference::ClientLightPreference;
use crate::color::{max_channel, normalize_brightness};
use crate::server_policy::{ServerLightPolicy, BRIGHTNESS_MAX};
use crate::LightUpdateSet;

/// One side's derived light value, snapshotted from its configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLight {
    /// The configured brightness integer that produced this value. The
    /// resolver tie-break compares these raw integers, not color magnitudes.
    pub brightness: u32,
    /// Final per-channel light contribution: the base color, optionally
    /// normalized, times `brightness / 1000`.
    pub color: Vec3,
    /// Cached `max_channel(color) > 0`, so the frame path skips black lights
    /// without re-checking channels.
    pub enabled: bool,
}

impl Default for ResolvedLight {
    /// A disabled black light: the safe state before any derivation has run.
    fn default() -> Self {
        Self {
            brightness: 0,
            color: Vec3::ZERO,
            enabled: false,
        }
    }
}

impl ResolvedLight {
    /// Derive the render-ready value for one configuration side.
    pub fn derive(brightness: u32, base_color: Vec3, normalize: bool) -> Self {
        let scale = brightness as f32 / BRIGHTNESS_MAX as f32;
        let base = if normalize {
            normalize_brightness(base_color)
        } else {
            base_color
        };
        let color = base * scale;
        Self {
            brightness,
            color,
            enabled: max_channel(color) > 0.0,
        }
    }
}

/// Published cache of both derived values, read once per rendered player per
/// frame. Recomputed only by the derivation systems below.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolvedPlayerLight {
    pub server: ResolvedLight,
    pub client: ResolvedLight,
}

impl ResolvedPlayerLight {
    /// Per-frame resolver: the side with the lower configured brightness
    /// wins; on a tie the server's value is used. Returns the light
    /// contribution to submit, or `None` when the winning side is disabled.
    pub fn contribution(&self) -> Option<Vec3> {
        let pick = if self.client.brightness < self.server.brightness {
            &self.client
        } else {
            &self.server
        };
        pick.enabled.then_some(pick.color)
    }
}

/// Recompute the server's derived value after its policy changed or first
/// appeared. The client's value reads the server base color, so it is
/// refreshed here too; while no client preference is loaded the client half
/// keeps its disabled default until that side's own first derivation.
pub fn derive_server_light(
    policy: Res<ServerLightPolicy>,
    preference: Option<Res<ClientLightPreference>>,
    mut resolved: ResMut<ResolvedPlayerLight>,
) {
    resolved.server =
        ResolvedLight::derive(policy.brightness, policy.base_color(), policy.normalize);
    if let Some(preference) = preference {
        resolved.client =
            ResolvedLight::derive(preference.brightness, policy.base_color(), policy.normalize);
    }
}

/// Recompute the client's derived value after its preference changed or first
/// appeared. The server policy supplies the base color; without one the
/// derivation aborts and the previous (safe) value stands.
pub fn derive_client_light(
    preference: Res<ClientLightPreference>,
    policy: Option<Res<ServerLightPolicy>>,
    mut resolved: ResMut<ResolvedPlayerLight>,
) {
    let Some(policy) = policy else {
        return;
    };
    resolved.client =
        ResolvedLight::derive(preference.brightness, policy.base_color(), policy.normalize);
}

pub struct ResolvedLightPlugin;

impl Plugin for ResolvedLightPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ResolvedPlayerLight>().add_systems(
            Update,
            (
                derive_server_light.run_if(resource_exists_and_changed::<ServerLightPolicy>),
                derive_client_light.run_if(resource_exists_and_changed::<ClientLightPreference>),
            )
                .chain()
                .in_set(LightUpdateSet::Derive),
        );
    }
}
