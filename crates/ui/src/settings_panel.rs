//! Light settings panel.
//!
//! An egui window (toggled with `L`) exposing the server policy and the
//! client preference side by side, plus a read-only row showing which side is
//! currently in effect. Edits go through the clamping setters and only on an
//! actual change, which is what triggers recomputation of the derived light.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use lighting::client_preference::ClientLightPreference;
use lighting::remote::{ServerSettingsChangeRequest, SettingsChangeRejected};
use lighting::resolved::ResolvedPlayerLight;
use lighting::server_policy::{ServerLightPolicy, BRIGHTNESS_MAX};

// =============================================================================
// Resources
// =============================================================================

/// Whether the light settings window is visible.
#[derive(Resource, Default)]
pub struct SettingsPanelVisible(pub bool);

/// Most recent answer to a remote change request, shown in the panel.
#[derive(Resource, Default)]
pub struct RejectionLog {
    pub last: Option<String>,
}

// =============================================================================
// Systems
// =============================================================================

/// `L` toggles the settings window.
///
/// Uses `Option<Res<ButtonInput<KeyCode>>>` so the system is a no-op in
/// headless contexts where Bevy's input plugin is not present.
pub fn panel_keybind(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut visible: ResMut<SettingsPanelVisible>,
) {
    let Some(keys) = keys else {
        return;
    };
    if keys.just_pressed(KeyCode::KeyL) {
        visible.0 = !visible.0;
    }
}

/// Remember the latest rejection so the panel can show it.
pub fn record_rejections(
    mut events: EventReader<SettingsChangeRejected>,
    mut log: ResMut<RejectionLog>,
) {
    for rejection in events.read() {
        log.last = Some(format!("client {}: {}", rejection.requester, rejection.message));
    }
}

/// Renders the light settings window.
pub fn settings_panel_ui(
    mut contexts: EguiContexts,
    mut visible: ResMut<SettingsPanelVisible>,
    mut policy: ResMut<ServerLightPolicy>,
    mut preference: ResMut<ClientLightPreference>,
    resolved: Res<ResolvedPlayerLight>,
    log: Res<RejectionLog>,
    mut requests: EventWriter<ServerSettingsChangeRequest>,
) {
    if !visible.0 {
        return;
    }

    let mut open = true;
    egui::Window::new("Player Light")
        .open(&mut open)
        .resizable(false)
        .default_width(300.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.spacing_mut().item_spacing.y = 8.0;

            // --- Server policy ---
            ui.heading("Server");
            let mut brightness = policy.brightness;
            if ui
                .add(egui::Slider::new(&mut brightness, 0..=BRIGHTNESS_MAX).text("Brightness"))
                .on_hover_text(
                    "Clients can choose a lower brightness.\n1000 is a torch, 200 a dim glow.",
                )
                .changed()
            {
                policy.set_brightness(brightness);
            }

            let mut normalize = policy.normalize;
            if ui
                .checkbox(&mut normalize, "Normalize color brightness")
                .on_hover_text("Rescale so the largest channel is 1. Ex: (0, 0.25, 0.5) -> (0, 0.5, 1)")
                .changed()
            {
                policy.set_normalize(normalize);
            }

            let mut red = policy.red;
            if ui
                .add(egui::Slider::new(&mut red, 0.0..=1.0).text("Red"))
                .changed()
            {
                policy.set_red(red);
            }
            let mut green = policy.green;
            if ui
                .add(egui::Slider::new(&mut green, 0.0..=1.0).text("Green"))
                .changed()
            {
                policy.set_green(green);
            }
            let mut blue = policy.blue;
            if ui
                .add(egui::Slider::new(&mut blue, 0.0..=1.0).text("Blue"))
                .changed()
            {
                policy.set_blue(blue);
            }

            ui.separator();

            // --- Client preference ---
            ui.heading("Client");
            let mut brightness = preference.brightness;
            if ui
                .add(egui::Slider::new(&mut brightness, 0..=BRIGHTNESS_MAX).text("Brightness"))
                .on_hover_text("Cannot be brighter than the server brightness.")
                .changed()
            {
                preference.set_brightness(brightness);
            }

            ui.separator();

            // --- Current outcome ---
            let winner = winner_label(preference.brightness, policy.brightness);
            match resolved.contribution() {
                Some(color) => {
                    ui.horizontal(|ui| {
                        ui.colored_label(swatch_color(color), "\u{2588}\u{2588}\u{2588}");
                        ui.label(format!(
                            "In effect: {} ({:.3}, {:.3}, {:.3})",
                            winner, color.x, color.y, color.z
                        ));
                    });
                }
                None => {
                    ui.label(format!("In effect: {} (light disabled)", winner));
                }
            }

            ui.separator();

            // --- Remote change demo ---
            if ui
                .button("Request change as remote client")
                .on_hover_text(
                    "Sends a server settings change as a non-owner client;\nthe gate rejects it.",
                )
                .clicked()
            {
                let mut pending = policy.clone();
                pending.set_brightness(BRIGHTNESS_MAX);
                requests.send(ServerSettingsChangeRequest {
                    pending,
                    requester: 1,
                });
            }
            if let Some(last) = &log.last {
                ui.label(egui::RichText::new(last).color(egui::Color32::LIGHT_RED));
            }
        });

    if !open {
        visible.0 = false;
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Which side's derived value the resolver forwards: the dimmer configured
/// brightness wins, ties go to the server.
fn winner_label(client_brightness: u32, server_brightness: u32) -> &'static str {
    if client_brightness < server_brightness {
        "client"
    } else {
        "server"
    }
}

/// Resolved colors are linear and can be dim; clamp into a displayable swatch.
fn swatch_color(color: Vec3) -> egui::Color32 {
    let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
    egui::Color32::from_rgb(byte(color.x), byte(color.y), byte(color.z))
}
