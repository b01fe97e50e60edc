//! Visualization module
//!
//! Spawns the rendered scene (sun, orbiting bodies, lights and star backdrop) and
//! keeps it in step with the orbit model and the debug panel.

use bevy::prelude::*;
use bevy::transform::TransformSystems;
use bevy_panorbit_camera::PanOrbitCameraSystemSet;

pub mod backdrop;
pub mod bodies;
pub mod lighting;

use crate::core::AnimationSystems;
use crate::ui::DebugControls;

/// Plugin for scene rendering
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugControls>()
            .add_systems(
                Startup,
                (
                    bodies::spawn_solar_system,
                    lighting::spawn_lights,
                    backdrop::spawn_star_backdrop,
                ),
            )
            .add_systems(
                Update,
                (
                    bodies::sync_orbit_transforms,
                    lighting::track_spotlight_targets,
                )
                    .chain()
                    .in_set(AnimationSystems::Sync),
            )
            .add_systems(
                Update,
                (lighting::apply_sun_intensity, bodies::apply_surface_roughness)
                    .run_if(resource_changed::<DebugControls>),
            )
            .add_systems(
                PostUpdate,
                backdrop::follow_main_camera
                    .after(PanOrbitCameraSystemSet)
                    .before(TransformSystems::Propagate),
            );
    }
}
