//! Lighting configuration systems

use std::f32::consts::PI;

use bevy::light::{GlobalAmbientLight, PointLightShadowMap};
use bevy::prelude::*;

use crate::core::SceneConfig;
use crate::orbital::{BodyId, SolarSystem};
use crate::ui::DebugControls;

/// Marker component for the point light sitting inside the sun
#[derive(Component)]
pub struct SunLight;

/// Spotlight that keeps aiming at a body.
#[derive(Component, Debug, Clone, Copy)]
pub struct TrackingSpotLight {
    pub target: BodyId,
}

/// Convert a candela-style panel intensity to the lumens Bevy lights expect.
pub fn intensity_to_lumens(intensity: f32) -> f32 {
    intensity * 4.0 * PI
}

pub fn spawn_lights(mut commands: Commands, config: Res<SceneConfig>, system: Res<SolarSystem>) {
    let lights = &config.lights;

    commands.insert_resource(GlobalAmbientLight {
        brightness: lights.ambient_brightness,
        ..default()
    });
    commands.insert_resource(PointLightShadowMap {
        size: lights.shadow_map_size,
    });
    commands.spawn((
        PointLight {
            color: Color::WHITE,
            intensity: intensity_to_lumens(lights.sun_intensity),
            range: lights.sun_range,
            shadows_enabled: true,
            shadow_map_near_z: lights.shadow_near,
            ..default()
        },
        SunLight,
        Transform::IDENTITY,
        Name::new("Sun Light"),
    ));

    // Physical lights fall off with the inverse square, matching a decay of 2.
    let [r, g, b] = lights.spot_color;
    let outer_angle = lights.spot_angle;
    let target = system.moon();
    commands.spawn((
        SpotLight {
            color: Color::srgb(r, g, b),
            intensity: intensity_to_lumens(lights.spot_intensity),
            range: lights.spot_range,
            outer_angle,
            inner_angle: outer_angle * (1.0 - lights.spot_penumbra),
            shadows_enabled: false,
            ..default()
        },
        TrackingSpotLight { target },
        aim_at(Transform::IDENTITY, system.body_world_translation(target)),
        Name::new("Moon Spotlight"),
    ));
}

fn aim_at(transform: Transform, target: Vec3) -> Transform {
    if (target - transform.translation).length_squared() <= f32::EPSILON {
        return transform;
    }
    transform.looking_at(target, Vec3::Y)
}

/// Re-aim tracking spotlights at their body's current world position
pub fn track_spotlight_targets(
    system: Res<SolarSystem>,
    mut lights: Query<(&TrackingSpotLight, &mut Transform)>,
) {
    for (tracking, mut transform) in &mut lights {
        let target = system.body_world_translation(tracking.target);
        *transform = aim_at(*transform, target);
    }
}

pub fn apply_sun_intensity(
    controls: Res<DebugControls>,
    mut lights: Query<&mut PointLight, With<SunLight>>,
) {
    let lumens = intensity_to_lumens(controls.sun_intensity);
    for mut light in &mut lights {
        if light.intensity != lumens {
            light.intensity = lumens;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_intensity_slider_sets_sun_light() {
        let mut app = App::new();
        let system = SolarSystem::default();
        let light = app
            .world_mut()
            .spawn((
                PointLight {
                    intensity: intensity_to_lumens(500.0),
                    ..default()
                },
                SunLight,
            ))
            .id();

        for value in [0.0, 10.0, 730.0, 1000.0] {
            let mut controls = DebugControls::from_scene(500.0, &system);
            controls.sun_intensity = value;
            app.insert_resource(controls);
            app.world_mut()
                .run_system_once(apply_sun_intensity)
                .expect("intensity system should run");

            let point = app.world().get::<PointLight>(light).unwrap();
            assert_eq!(point.intensity, intensity_to_lumens(value));
        }
    }

    #[test]
    fn test_spotlight_tracks_moon() {
        let mut app = App::new();
        let mut system = SolarSystem::default();
        system.tick(7.5);
        let moon = system.moon();
        let moon_position = system.body_world_translation(moon);
        app.insert_resource(system);

        let light = app
            .world_mut()
            .spawn((TrackingSpotLight { target: moon }, Transform::IDENTITY))
            .id();
        app.world_mut()
            .run_system_once(track_spotlight_targets)
            .expect("tracking system should run");

        let transform = app.world().get::<Transform>(light).unwrap();
        let facing = transform.forward().as_vec3();
        assert!(facing.dot(moon_position.normalize()) > 0.9999);
    }

    #[test]
    fn test_aim_at_own_position_keeps_transform() {
        let transform = Transform::from_xyz(1.0, 2.0, 3.0);
        assert_eq!(aim_at(transform, Vec3::new(1.0, 2.0, 3.0)), transform);
    }
}
