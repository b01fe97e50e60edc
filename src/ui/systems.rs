//! UI systems for the egui debug panel

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::core::ViewportState;
use crate::ui::panels::render_debug_panel;
use crate::ui::state::DebugControls;

/// Draw the debug panel in the top-right corner and store any edits.
pub fn debug_panel_system(
    mut contexts: EguiContexts,
    mut controls: ResMut<DebugControls>,
    viewport: Res<ViewportState>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    // Edit a copy so untouched frames don't trip change detection.
    let mut edited = controls.clone();
    egui::Window::new("Controls")
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| render_debug_panel(ui, &mut edited, &viewport));

    if controls.set_if_neq(edited) {
        debug!(
            "Debug controls changed: sun intensity {}",
            controls.sun_intensity
        );
    }
}
