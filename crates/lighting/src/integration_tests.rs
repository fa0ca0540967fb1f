//! End-to-end tests: settings change -> derivation -> resolver output.
//!
//! These run the real schedule through the `TestMod` harness, so they cover
//! the change-detection wiring and cross-side invalidation, not just the pure
//! derivation math.

use bevy::prelude::*;

use crate::client_preference::ClientLightPreference;
use crate::server_policy::ServerLightPolicy;
use crate::test_harness::TestMod;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-5
}

/// The default policy color, normalized and scaled by the default server
/// brightness of 200.
fn default_server_color() -> Vec3 {
    Vec3::new(0.59, 0.52, 0.70) / 0.70 * 0.2
}

// ===========================================================================
// 1. First-load derivation
// ===========================================================================

#[test]
fn default_configuration_resolves_to_server_value() {
    let sim = TestMod::new();
    let resolved = sim.resolved();

    assert_eq!(resolved.server.brightness, 200);
    assert_eq!(resolved.client.brightness, 1000);
    assert!(resolved.server.enabled);
    assert!(resolved.client.enabled);

    // Client 1000 >= server 200: the server's derived value renders.
    let contribution = resolved.contribution().expect("light should be enabled");
    assert!(approx(contribution, default_server_color()));
}

// ===========================================================================
// 2. Resolver pick between the two sides
// ===========================================================================

#[test]
fn dimmer_client_preference_wins() {
    let mut sim = TestMod::new();
    sim.set_client_brightness(100);
    sim.tick();

    let resolved = sim.resolved();
    let contribution = resolved.contribution().expect("light should be enabled");
    assert!(approx(contribution, resolved.client.color));
    assert!(approx(
        contribution,
        Vec3::new(0.59, 0.52, 0.70) / 0.70 * 0.1
    ));
}

#[test]
fn equal_brightness_favors_server() {
    let mut sim = TestMod::new();
    sim.set_client_brightness(200);
    sim.tick();

    let resolved = sim.resolved();
    let contribution = resolved.contribution().expect("light should be enabled");
    assert_eq!(contribution, resolved.server.color);
}

#[test]
fn zero_server_brightness_renders_nothing() {
    let mut sim = TestMod::new();
    sim.set_server_brightness(0);
    sim.tick();

    let resolved = sim.resolved();
    // Client 1000 >= server 0: the server side wins and is disabled, so
    // nothing is submitted even though the client side is lit.
    assert!(!resolved.server.enabled);
    assert!(resolved.client.enabled);
    assert_eq!(resolved.contribution(), None);
}

#[test]
fn zero_client_brightness_renders_nothing() {
    let mut sim = TestMod::new();
    sim.set_client_brightness(0);
    sim.tick();

    let resolved = sim.resolved();
    assert!(resolved.server.enabled);
    assert!(!resolved.client.enabled);
    assert_eq!(resolved.contribution(), None);
}

// ===========================================================================
// 3. Cross-side invalidation
// ===========================================================================

#[test]
fn server_color_change_updates_client_derived_value() {
    let mut sim = TestMod::new();
    sim.set_client_brightness(100);
    sim.tick();
    let before = sim.resolved().client;

    sim.set_server_color(1.0, 0.0, 0.0);
    sim.tick();

    let after = sim.resolved().client;
    assert!(approx(after.color, Vec3::new(0.1, 0.0, 0.0)));
    assert_ne!(before.color, after.color);
    // The client's own settings never changed.
    assert_eq!(after.brightness, 100);
    assert_eq!(sim.client_preference().brightness, 100);
}

#[test]
fn server_normalize_toggle_updates_both_derived_values() {
    let mut sim = TestMod::new();
    sim.set_server_normalize(false);
    sim.tick();

    let resolved = sim.resolved();
    let unnormalized = Vec3::new(0.59, 0.52, 0.70) * 0.2;
    assert!(approx(resolved.server.color, unnormalized));
    assert!(approx(resolved.client.color, Vec3::new(0.59, 0.52, 0.70)));
}

// ===========================================================================
// 4. Missing counterpart: safe disabled default until both sides loaded
// ===========================================================================

#[test]
fn server_only_renders_nothing_until_client_loads() {
    let mut sim = TestMod::server_only();

    let resolved = sim.resolved();
    assert!(resolved.server.enabled, "server side derived normally");
    assert!(!resolved.client.enabled, "client side stays at safe default");
    assert_eq!(resolved.contribution(), None);

    sim.insert_client_preference(ClientLightPreference::default());
    sim.tick();

    let resolved = sim.resolved();
    assert!(resolved.client.enabled);
    assert!(approx(
        resolved.contribution().expect("both sides loaded"),
        default_server_color()
    ));
}

#[test]
fn client_only_renders_nothing_until_server_loads() {
    let mut sim = TestMod::client_only();

    let resolved = sim.resolved();
    assert!(!resolved.server.enabled);
    assert!(!resolved.client.enabled, "no base color to derive from");
    assert_eq!(resolved.contribution(), None);

    sim.insert_server_policy(ServerLightPolicy::default());
    sim.tick();

    let resolved = sim.resolved();
    assert!(resolved.server.enabled);
    assert!(resolved.client.enabled, "server load re-derives the client");
    assert!(approx(
        resolved.contribution().expect("both sides loaded"),
        default_server_color()
    ));
}

// ===========================================================================
// 5. Remote change authorization
// ===========================================================================

#[test]
fn remote_change_is_rejected_and_state_unchanged() {
    let mut sim = TestMod::new();
    let before_policy = sim.server_policy();
    let before_resolved = sim.resolved();

    let mut pending = ServerLightPolicy::default();
    pending.set_brightness(1000);
    pending.set_red(1.0);
    sim.request_remote_change(pending, 9);
    sim.tick();

    let rejections = sim.take_rejections();
    assert_eq!(rejections.len(), 1);
    assert_eq!(rejections[0].requester, 9);
    assert!(!rejections[0].message.is_empty());

    assert_eq!(sim.server_policy(), before_policy);
    assert_eq!(sim.resolved(), before_resolved);
}

// ===========================================================================
// 6. Wholesale replacement on save/load
// ===========================================================================

#[test]
fn loaded_settings_replace_and_rederive() {
    let mut source = TestMod::new();
    source.set_server_brightness(700);
    source.set_server_color(0.0, 0.0, 1.0);
    source.set_client_brightness(400);
    source.tick();
    let extensions = source.save_state();

    let mut restored = TestMod::new();
    restored.load_state(&extensions);
    restored.tick();

    let resolved = restored.resolved();
    assert_eq!(resolved.server.brightness, 700);
    assert_eq!(resolved.client.brightness, 400);
    // Client 400 < server 700: the restored client preference wins, derived
    // from the restored server base color.
    assert!(approx(
        resolved.contribution().expect("light should be enabled"),
        Vec3::new(0.0, 0.0, 0.4)
    ));
}
