//! Debug panel contents
use bevy_egui::egui;

use crate::core::ViewportState;
use crate::ui::state::{
    DebugControls, ROUGHNESS_RANGE, ROUGHNESS_STEP, SUN_INTENSITY_RANGE, SUN_INTENSITY_STEP,
};

pub fn render_debug_panel(ui: &mut egui::Ui, controls: &mut DebugControls, viewport: &ViewportState) {
    egui::CollapsingHeader::new("Sun")
        .default_open(true)
        .show(ui, |ui| {
            ui.add(
                egui::Slider::new(&mut controls.sun_intensity, SUN_INTENSITY_RANGE)
                    .step_by(SUN_INTENSITY_STEP)
                    .text("intensity"),
            );
        });

    for surface in &mut controls.surfaces {
        ui.add(
            egui::Slider::new(&mut surface.roughness, ROUGHNESS_RANGE)
                .step_by(ROUGHNESS_STEP)
                .text(surface.label.as_str()),
        );
    }

    ui.separator();
    let buffer = viewport.buffer_size();
    ui.weak(format!(
        "{:.0}x{:.0} @ {:.2}x ({}x{} px)",
        viewport.width, viewport.height, viewport.pixel_ratio, buffer.x, buffer.y
    ));
}
