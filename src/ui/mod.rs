//! User interface module
//!
//! The egui debug panel exposing the sun intensity and surface roughness sliders.

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub mod panels;
pub mod state;
pub mod systems;

pub use state::DebugControls;
pub use systems::debug_panel_system;

/// Plugin for the debug panel
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugControls>()
            .add_systems(EguiPrimaryContextPass, debug_panel_system);
    }
}
