use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod settings_panel;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<settings_panel::SettingsPanelVisible>()
            .init_resource::<settings_panel::RejectionLog>()
            .add_systems(
                Update,
                (
                    settings_panel::panel_keybind,
                    settings_panel::record_rejections,
                    settings_panel::settings_panel_ui,
                )
                    .in_set(lighting::LightUpdateSet::Input),
            );
    }
}
