//! Headless test harness for the light settings stack.
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + `LightingPlugin` so tests
//! can mutate configuration, advance frames, and assert on the derived state
//! without a window or renderer.

use bevy::prelude::*;
use std::collections::BTreeMap;

use crate::client_preference::ClientLightPreference;
use crate::remote::{ServerSettingsChangeRequest, SettingsChangeRejected};
use crate::resolved::ResolvedPlayerLight;
use crate::server_policy::ServerLightPolicy;
use crate::{LightingPlugin, SaveableRegistry};

/// A headless app wrapping `LightingPlugin`.
pub struct TestMod {
    app: App,
}

impl TestMod {
    /// Both configuration sides loaded, one frame run so the initial
    /// derivation has happened.
    pub fn new() -> Self {
        let mut app = Self::base_app();
        app.update();
        Self { app }
    }

    /// Only the server side loaded, as when the client preference has not
    /// arrived yet.
    pub fn server_only() -> Self {
        let mut app = Self::base_app();
        app.world_mut().remove_resource::<ClientLightPreference>();
        app.update();
        Self { app }
    }

    /// Only the client side loaded, as when the server policy has not
    /// arrived yet.
    pub fn client_only() -> Self {
        let mut app = Self::base_app();
        app.world_mut().remove_resource::<ServerLightPolicy>();
        app.update();
        Self { app }
    }

    fn base_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(LightingPlugin);
        app
    }

    /// Advance one frame.
    pub fn tick(&mut self) {
        self.app.update();
    }

    // -----------------------------------------------------------------------
    // Configuration mutators (take effect on the next `tick`)
    // -----------------------------------------------------------------------

    pub fn set_server_brightness(&mut self, brightness: u32) {
        self.app
            .world_mut()
            .resource_mut::<ServerLightPolicy>()
            .set_brightness(brightness);
    }

    pub fn set_server_color(&mut self, red: f32, green: f32, blue: f32) {
        let mut policy = self.app.world_mut().resource_mut::<ServerLightPolicy>();
        policy.set_red(red);
        policy.set_green(green);
        policy.set_blue(blue);
    }

    pub fn set_server_normalize(&mut self, normalize: bool) {
        self.app
            .world_mut()
            .resource_mut::<ServerLightPolicy>()
            .set_normalize(normalize);
    }

    pub fn set_client_brightness(&mut self, brightness: u32) {
        self.app
            .world_mut()
            .resource_mut::<ClientLightPreference>()
            .set_brightness(brightness);
    }

    /// Install a configuration side that was missing at startup.
    pub fn insert_server_policy(&mut self, policy: ServerLightPolicy) {
        self.app.world_mut().insert_resource(policy);
    }

    /// Install a configuration side that was missing at startup.
    pub fn insert_client_preference(&mut self, preference: ClientLightPreference) {
        self.app.world_mut().insert_resource(preference);
    }

    /// Send a remote change request, as a non-owner client would.
    pub fn request_remote_change(&mut self, pending: ServerLightPolicy, requester: u32) {
        self.app
            .world_mut()
            .send_event(ServerSettingsChangeRequest { pending, requester });
    }

    // -----------------------------------------------------------------------
    // State accessors
    // -----------------------------------------------------------------------

    pub fn resolved(&self) -> ResolvedPlayerLight {
        *self.app.world().resource::<ResolvedPlayerLight>()
    }

    pub fn server_policy(&self) -> ServerLightPolicy {
        self.app.world().resource::<ServerLightPolicy>().clone()
    }

    pub fn client_preference(&self) -> ClientLightPreference {
        self.app
            .world()
            .resource::<ClientLightPreference>()
            .clone()
    }

    /// Drain every rejection emitted so far.
    pub fn take_rejections(&mut self) -> Vec<SettingsChangeRejected> {
        self.app
            .world_mut()
            .resource_mut::<Events<SettingsChangeRejected>>()
            .drain()
            .collect()
    }

    // -----------------------------------------------------------------------
    // Save/load plumbing
    // -----------------------------------------------------------------------

    /// Serialize all registered settings into an extension map.
    pub fn save_state(&mut self) -> BTreeMap<String, Vec<u8>> {
        self.app
            .world_mut()
            .resource_scope(|world, registry: Mut<SaveableRegistry>| registry.save_all(world))
    }

    /// Restore settings from an extension map, replacing the live resources
    /// wholesale.
    pub fn load_state(&mut self, extensions: &BTreeMap<String, Vec<u8>>) {
        self.app
            .world_mut()
            .resource_scope(|world, registry: Mut<SaveableRegistry>| {
                registry.load_all(world, extensions)
            });
    }
}
