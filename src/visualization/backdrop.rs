//! Star backdrop: an unlit sphere seen from the inside, centered on the camera.

use bevy::light::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;

use crate::core::{MainCamera, SceneConfig};

#[derive(Component)]
pub struct StarBackdrop;

pub fn spawn_star_backdrop(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<SceneConfig>,
) {
    let backdrop = &config.backdrop;
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(backdrop.radius).mesh().uv(64, 32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(asset_server.load(backdrop.texture.clone())),
            unlit: true,
            cull_mode: None,
            fog_enabled: false,
            ..default()
        })),
        NotShadowCaster,
        NotShadowReceiver,
        StarBackdrop,
        // Mirror X so the texture reads correctly from inside the sphere.
        Transform::from_scale(Vec3::new(-1.0, 1.0, 1.0)),
        Name::new("Star Backdrop"),
    ));
}

pub fn follow_main_camera(
    cameras: Query<&Transform, (With<MainCamera>, Without<StarBackdrop>)>,
    mut backdrops: Query<&mut Transform, With<StarBackdrop>>,
) {
    let Ok(camera) = cameras.single() else {
        return;
    };
    for mut transform in &mut backdrops {
        transform.translation = camera.translation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_backdrop_recenters_on_camera() {
        let mut app = App::new();
        app.world_mut()
            .spawn((MainCamera, Transform::from_xyz(10.0, 10.0, 20.0)));
        let backdrop = app
            .world_mut()
            .spawn((StarBackdrop, Transform::from_scale(Vec3::new(-1.0, 1.0, 1.0))))
            .id();

        app.world_mut()
            .run_system_once(follow_main_camera)
            .expect("backdrop system should run");

        let transform = app.world().get::<Transform>(backdrop).unwrap();
        assert_eq!(transform.translation, Vec3::new(10.0, 10.0, 20.0));
        assert_eq!(transform.scale, Vec3::new(-1.0, 1.0, 1.0));
    }
}
