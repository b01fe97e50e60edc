//! Orbital model module
//!
//! Owns the [`SolarSystem`] scene model and advances it once per animation tick.

use bevy::prelude::*;

pub mod solar_system;

pub use solar_system::{BodyId, PivotId, PivotParent, SolarSystem};

use crate::core::{AnimationClock, AnimationSystems, SceneConfig};

/// Plugin for the orbit hierarchy and its tick rule
pub struct OrbitalPlugin;

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        let system = app
            .world()
            .get_resource::<SceneConfig>()
            .map(SolarSystem::from_config)
            .unwrap_or_default();

        app.insert_resource(system)
            .add_systems(Update, advance_solar_system.in_set(AnimationSystems::Model));
    }
}

pub fn advance_solar_system(clock: Res<AnimationClock>, mut system: ResMut<SolarSystem>) {
    system.tick(clock.elapsed_secs());
}
