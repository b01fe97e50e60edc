//! Debug panel state

use std::ops::RangeInclusive;

use bevy::prelude::*;

use crate::core::SceneConfig;
use crate::orbital::{BodyId, SolarSystem};

pub const SUN_INTENSITY_RANGE: RangeInclusive<f32> = 0.0..=1000.0;
pub const SUN_INTENSITY_STEP: f64 = 10.0;
pub const ROUGHNESS_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const ROUGHNESS_STEP: f64 = 0.01;

/// Values edited by the debug panel and pushed onto live lights and materials.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct DebugControls {
    /// Sun point light intensity in the panel's candela-style units.
    pub sun_intensity: f32,
    pub surfaces: Vec<SurfaceControl>,
}

/// Roughness slider for one body's material
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceControl {
    pub body: BodyId,
    pub label: String,
    pub roughness: f32,
}

impl DebugControls {
    pub fn from_scene(sun_intensity: f32, system: &SolarSystem) -> Self {
        let surfaces = system
            .bodies()
            .map(|(id, body)| SurfaceControl {
                body: id,
                label: format!("{} Roughness", body.name),
                roughness: body.roughness,
            })
            .collect();
        Self {
            sun_intensity,
            surfaces,
        }
    }

    pub fn roughness_of(&self, body: BodyId) -> Option<f32> {
        self.surfaces
            .iter()
            .find(|surface| surface.body == body)
            .map(|surface| surface.roughness)
    }
}

impl FromWorld for DebugControls {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<SceneConfig>()
            .cloned()
            .unwrap_or_default();
        match world.get_resource::<SolarSystem>() {
            Some(system) => Self::from_scene(config.lights.sun_intensity, system),
            None => Self::from_scene(
                config.lights.sun_intensity,
                &SolarSystem::from_config(&config),
            ),
        }
    }
}
