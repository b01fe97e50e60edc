//! Sun, planet and moon entities mirroring the [`SolarSystem`] model.

use std::collections::HashMap;

use bevy::light::NotShadowCaster;
use bevy::prelude::*;

use crate::core::SceneConfig;
use crate::orbital::{BodyId, PivotId, PivotParent, SolarSystem};
use crate::ui::DebugControls;

const SPHERE_SECTORS: u32 = 32;
const SPHERE_STACKS: u32 = 32;

/// Marker component for the sun mesh.
#[derive(Component)]
pub struct Sun;

/// Invisible anchor entity driven by a model pivot.
#[derive(Component, Debug, Clone, Copy)]
pub struct PivotNode(pub PivotId);

/// Body mesh entity driven by a model body.
#[derive(Component, Debug, Clone, Copy)]
pub struct BodyNode(pub BodyId);

pub fn spawn_solar_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<SceneConfig>,
    system: Res<SolarSystem>,
) {
    // The sun emits its own light; a shadow-casting shell around the point light would
    // black out the whole scene.
    commands.spawn((
        Mesh3d(meshes.add(
            Sphere::new(system.sun_size())
                .mesh()
                .uv(SPHERE_SECTORS, SPHERE_STACKS),
        )),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(asset_server.load(config.sun.texture.clone())),
            unlit: true,
            ..default()
        })),
        NotShadowCaster,
        Sun,
        Transform::IDENTITY,
        Name::new("Sun"),
    ));

    let anchor = commands
        .spawn((Transform::IDENTITY, Visibility::default(), Name::new("Sun Orbit")))
        .id();

    let mut body_entities: HashMap<BodyId, Entity> = HashMap::new();
    for (pivot_id, pivot) in system.pivots() {
        let parent = match pivot.parent {
            PivotParent::Root => anchor,
            PivotParent::Body(body) => match body_entities.get(&body) {
                Some(entity) => *entity,
                None => {
                    warn!("spawn_solar_system: parent body {:?} not spawned yet", body);
                    continue;
                }
            },
        };

        let body = system.body(pivot.body);
        let pivot_entity = commands
            .spawn((
                PivotNode(pivot_id),
                system.pivot_local(pivot_id),
                Visibility::default(),
                Name::new(format!("{} Orbit", body.name)),
                ChildOf(parent),
            ))
            .id();

        let material = StandardMaterial {
            base_color_texture: Some(asset_server.load(body.texture.clone())),
            perceptual_roughness: body.roughness,
            metallic: 0.0,
            emissive: LinearRgba::WHITE * body.emissive_strength,
            ..default()
        };
        let body_entity = commands
            .spawn((
                Mesh3d(meshes.add(
                    Sphere::new(body.size)
                        .mesh()
                        .uv(SPHERE_SECTORS, SPHERE_STACKS),
                )),
                MeshMaterial3d(materials.add(material)),
                BodyNode(pivot.body),
                system.body_local(pivot.body),
                Name::new(body.name.clone()),
                ChildOf(pivot_entity),
            ))
            .id();
        body_entities.insert(pivot.body, body_entity);

        info!(
            "Spawned {} (size {}, distance {}, speed {} rad/s)",
            body.name, body.size, body.distance, body.speed
        );
    }
}

/// Copy pivot angles, body offsets and spins from the model onto entity transforms.
pub fn sync_orbit_transforms(
    system: Res<SolarSystem>,
    mut pivots: Query<(&PivotNode, &mut Transform), Without<BodyNode>>,
    mut bodies: Query<(&BodyNode, &mut Transform), Without<PivotNode>>,
) {
    for (node, mut transform) in &mut pivots {
        *transform = system.pivot_local(node.0);
    }
    for (node, mut transform) in &mut bodies {
        *transform = system.body_local(node.0);
    }
}

pub fn apply_surface_roughness(
    controls: Res<DebugControls>,
    bodies: Query<(&BodyNode, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (node, handle) in &bodies {
        let Some(roughness) = controls.roughness_of(node.0) else {
            continue;
        };
        let Some(mut material) = materials.get_mut(&handle.0) else {
            continue;
        };
        if material.perceptual_roughness != roughness {
            material.perceptual_roughness = roughness;
        }
    }
}
