//! Main camera: spawn with `bevy_panorbit_camera` attached, and keep its projection in step
//! with the window.

use bevy::camera::Exposure;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use bevy_panorbit_camera::PanOrbitCamera;

use crate::core::config::SceneConfig;
use crate::core::viewport::ViewportState;

/// Marker for the camera the scene is rendered from.
#[derive(Component)]
pub struct MainCamera;

pub struct MainCameraPlugin;

impl Plugin for MainCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportState>()
            .add_systems(Startup, (init_viewport, spawn_main_camera).chain())
            .add_systems(Update, handle_window_resized);
    }
}

fn init_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Res<SceneConfig>,
    mut viewport: ResMut<ViewportState>,
) {
    let Ok(window) = windows.single() else {
        warn!("init_viewport: primary window not found");
        return;
    };
    // A window minimized at startup keeps the default viewport until it is resized.
    let Some(state) = ViewportState::from_window_size(
        window.width(),
        window.height(),
        window.scale_factor(),
        config.max_pixel_ratio,
    ) else {
        debug!("init_viewport: window has no area; keeping default viewport");
        return;
    };
    *viewport = state;
}

pub fn spawn_main_camera(
    mut commands: Commands,
    config: Res<SceneConfig>,
    viewport: Res<ViewportState>,
) {
    let camera = &config.camera;
    let position = Vec3::from_array(camera.position);

    let pan_orbit = PanOrbitCamera {
        focus: Vec3::ZERO,
        orbit_smoothness: camera.damping,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            aspect_ratio: viewport.aspect_ratio(),
            near: camera.near,
            far: camera.far,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        Exposure {
            ev100: camera.exposure_ev100,
        },
        Tonemapping::TonyMcMapface,
        pan_orbit,
        MainCamera,
        Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Main Camera"),
    ));
}

/// Recompute the aspect ratio and render-surface size on every resize.
pub fn handle_window_resized(
    mut resized: MessageReader<WindowResized>,
    windows: Query<&Window>,
    config: Res<SceneConfig>,
    mut viewport: ResMut<ViewportState>,
    mut cameras: Query<&mut Projection, With<MainCamera>>,
) {
    for event in resized.read() {
        let device_scale = windows
            .get(event.window)
            .map(|window| window.scale_factor())
            .unwrap_or(1.0);
        // Minimized windows report a zero height.
        let Some(state) = ViewportState::from_window_size(
            event.width,
            event.height,
            device_scale,
            config.max_pixel_ratio,
        ) else {
            continue;
        };
        *viewport = state;

        for mut projection in &mut cameras {
            if let Projection::Perspective(perspective) = projection.as_mut() {
                perspective.aspect_ratio = viewport.aspect_ratio();
            }
        }
        debug!(
            "Viewport resized to {}x{} (buffer {})",
            event.width,
            event.height,
            viewport.buffer_size()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn resize_app() -> (App, Entity) {
        let mut app = App::new();
        app.add_message::<WindowResized>()
            .insert_resource(SceneConfig::default())
            .init_resource::<ViewportState>();
        let camera = app
            .world_mut()
            .spawn((
                Projection::Perspective(PerspectiveProjection::default()),
                MainCamera,
            ))
            .id();
        (app, camera)
    }

    fn send_resize(app: &mut App, width: f32, height: f32) {
        app.world_mut().write_message(WindowResized {
            window: Entity::PLACEHOLDER,
            width,
            height,
        });
        app.world_mut()
            .run_system_once(handle_window_resized)
            .expect("resize system should run");
    }

    fn aspect_of(app: &App, camera: Entity) -> f32 {
        match app.world().get::<Projection>(camera) {
            Some(Projection::Perspective(perspective)) => perspective.aspect_ratio,
            _ => panic!("camera lost its perspective projection"),
        }
    }

    #[test]
    fn test_resize_updates_camera_aspect_and_viewport() {
        let (mut app, camera) = resize_app();
        send_resize(&mut app, 1600.0, 900.0);

        assert!((aspect_of(&app, camera) - 1600.0 / 900.0).abs() < 1e-6);
        let viewport = app.world().resource::<ViewportState>();
        assert_eq!(viewport.buffer_size(), UVec2::new(1600, 900));
    }

    #[test]
    fn test_resize_is_idempotent() {
        let (mut app, camera) = resize_app();
        send_resize(&mut app, 1024.0, 768.0);
        send_resize(&mut app, 1024.0, 768.0);

        assert!((aspect_of(&app, camera) - 1024.0 / 768.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_height_resize_is_ignored() {
        let (mut app, camera) = resize_app();
        send_resize(&mut app, 800.0, 400.0);
        send_resize(&mut app, 800.0, 0.0);

        assert!((aspect_of(&app, camera) - 2.0).abs() < 1e-6);
        assert_eq!(app.world().resource::<ViewportState>().height, 400.0);
    }

    #[test]
    fn test_minimized_window_at_startup_keeps_default_viewport() {
        let mut app = App::new();
        app.insert_resource(SceneConfig::default())
            .init_resource::<ViewportState>();
        let mut window = Window::default();
        window.resolution.set(800.0, 0.0);
        app.world_mut().spawn((window, PrimaryWindow));

        app.world_mut()
            .run_system_once(init_viewport)
            .expect("viewport system should run");
        app.world_mut()
            .run_system_once(spawn_main_camera)
            .expect("camera system should run");

        assert_eq!(
            *app.world().resource::<ViewportState>(),
            ViewportState::default()
        );
        let mut cameras = app
            .world_mut()
            .query_filtered::<&Projection, With<MainCamera>>();
        let projection = cameras
            .single(app.world())
            .expect("one main camera");
        let Projection::Perspective(perspective) = projection else {
            panic!("main camera should use a perspective projection");
        };
        assert!(perspective.aspect_ratio.is_finite());
    }
}
