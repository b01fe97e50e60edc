//! Core resources: configuration, the animation clock and the main camera.

use bevy::prelude::*;

pub mod clock;
pub mod config;
pub mod orbit_camera;
pub mod viewport;

pub use clock::{AnimationClock, AnimationLoop, AnimationSystems, animation_running};
pub use config::SceneConfig;
pub use orbit_camera::{MainCamera, MainCameraPlugin};
pub use viewport::ViewportState;

/// Plugin owning the scene config and the animation loop
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        // Tests and embedders may insert their own config first.
        if !app.world().contains_resource::<SceneConfig>() {
            app.insert_resource(SceneConfig::load_or_default());
        }
        let tick_limit = app.world().resource::<SceneConfig>().tick_limit;

        app.add_message::<AppExit>()
            .init_resource::<AnimationClock>()
            .insert_resource(AnimationLoop::new(tick_limit))
            .configure_sets(
                Update,
                (
                    AnimationSystems::Clock,
                    AnimationSystems::Model,
                    AnimationSystems::Sync,
                    AnimationSystems::Control,
                )
                    .chain()
                    .run_if(animation_running),
            )
            .add_systems(
                Update,
                (
                    clock::advance_animation_clock.in_set(AnimationSystems::Clock),
                    clock::enforce_tick_limit.in_set(AnimationSystems::Control),
                ),
            );
    }
}
