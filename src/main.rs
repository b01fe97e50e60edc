// A toy sun/earth/moon orrery: nested orbit pivots, shadows, an orbit camera and a
// small debug panel.

use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use bevy_egui::EguiPlugin;
use bevy_panorbit_camera::PanOrbitCameraPlugin;

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod core;
mod orbital;
mod ui;
mod visualization;

use crate::core::{CorePlugin, MainCameraPlugin};
use orbital::OrbitalPlugin;
use ui::UiPlugin;
use visualization::VisualizationPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Solar System".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    app.insert_resource(ClearColor(Color::BLACK));
    app.add_plugins(EguiPlugin::default());
    app.add_plugins(PanOrbitCameraPlugin);

    // Order matters: later plugins read the config and the orbit model at build time.
    app.add_plugins(CorePlugin);
    app.add_plugins(OrbitalPlugin);
    app.add_plugins(MainCameraPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_plugins(UiPlugin);

    app.run();
}
