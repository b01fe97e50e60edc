//! Scene configuration
//!
//! Every tunable of the scene lives in [`SceneConfig`]. The defaults reproduce the
//! classic sun/earth/moon demo; an optional JSON file can override any top-level
//! section.

use std::env;
use std::f32::consts::FRAC_PI_4;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, ensure};
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::Deserialize;

use crate::ui::state::{ROUGHNESS_RANGE, SUN_INTENSITY_RANGE};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SOLARSYSTEM_CONFIG";
const CONFIG_FILE_NAME: &str = "scene.json";

/// Root configuration resource
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub sun: SunConfig,
    pub earth: BodyConfig,
    pub moon: BodyConfig,
    pub camera: CameraConfig,
    pub lights: LightConfig,
    pub backdrop: BackdropConfig,
    /// Upper bound for the device pixel ratio used by the render surface.
    pub max_pixel_ratio: f32,
    /// Stop the animation loop (and exit) after this many ticks. `None` runs forever.
    pub tick_limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    pub size: f32,
    pub texture: String,
}

/// Orbital and surface parameters of one body.
///
/// Bodies are overridden as a whole: a `"moon"` section must list every field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    pub size: f32,
    pub distance: f32,
    /// Orbital angular velocity (rad/s).
    pub speed: f32,
    /// Axial spin added on every tick (rad/tick).
    pub spin_step: f32,
    pub roughness: f32,
    pub emissive_strength: f32,
    pub texture: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub exposure_ev100: f32,
    /// Orbit damping handed to the pan-orbit controller (0 = none).
    pub damping: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Scene-wide ambient light (cd/m²). The demo relies on the sun alone.
    pub ambient_brightness: f32,
    pub sun_intensity: f32,
    pub sun_range: f32,
    pub shadow_map_size: usize,
    pub shadow_near: f32,
    /// sRGB color of the moon spotlight.
    pub spot_color: [f32; 3],
    pub spot_intensity: f32,
    pub spot_range: f32,
    /// Half-angle of the spotlight cone (rad).
    pub spot_angle: f32,
    /// Fraction of the cone that fades out, 0..=1.
    pub spot_penumbra: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub radius: f32,
    pub texture: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sun: SunConfig::default(),
            earth: BodyConfig::earth(),
            moon: BodyConfig::moon(),
            camera: CameraConfig::default(),
            lights: LightConfig::default(),
            backdrop: BackdropConfig::default(),
            max_pixel_ratio: 2.0,
            tick_limit: None,
        }
    }
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            size: 5.0,
            texture: "textures/planet/2k_sun.jpg".to_string(),
        }
    }
}

impl BodyConfig {
    pub fn earth() -> Self {
        Self {
            name: "Earth".to_string(),
            size: 3.0,
            distance: 17.0,
            speed: 0.03,
            spin_step: 0.01,
            roughness: 0.5,
            emissive_strength: 0.0,
            texture: "textures/planet/2k_earth_daymap.jpg".to_string(),
        }
    }

    pub fn moon() -> Self {
        Self {
            name: "Moon".to_string(),
            size: 1.0,
            distance: 6.0,
            speed: 0.5,
            spin_step: 0.02,
            roughness: 0.5,
            emissive_strength: 0.2,
            texture: "textures/planet/2k_moon.jpg".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            position: [10.0, 10.0, 20.0],
            exposure_ev100: 0.0,
            damping: 0.1,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            ambient_brightness: 0.0,
            sun_intensity: 500.0,
            sun_range: 100.0,
            shadow_map_size: 2048,
            shadow_near: 0.5,
            spot_color: [0xaa as f32 / 255.0; 3],
            spot_intensity: 700.0,
            spot_range: 50.0,
            spot_angle: FRAC_PI_4,
            spot_penumbra: 0.5,
        }
    }
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            radius: 90.0,
            texture: "textures/planet/2k_stars_milky_way.jpg".to_string(),
        }
    }
}

impl SceneConfig {
    /// Location of the config file: `$SOLARSYSTEM_CONFIG`, else the platform config dir
    ///
    /// - Linux: ~/.config/solarsystem/scene.json
    /// - macOS: ~/Library/Application Support/solarsystem/scene.json
    /// - Windows: %APPDATA%\solarsystem\config\scene.json
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("", "", "solarsystem").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Parse and validate a config document.
    pub fn from_json(contents: &str) -> Result<Self, anyhow::Error> {
        let config: SceneConfig =
            serde_json::from_str(contents).context("Failed to parse scene config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file from disk
    ///
    /// Returns Ok(None) when the file does not exist.
    pub fn load_from_path(path: &Path) -> Result<Option<Self>, anyhow::Error> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Invalid scene config {}", path.display()))
            .map(Some)
    }

    /// Load the config from [`Self::default_path`], falling back to defaults on any problem.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            warn!("Could not resolve a config directory; using default scene");
            return Self::default();
        };
        match Self::load_from_path(&path) {
            Ok(Some(config)) => {
                info!("Loaded scene config from {}", path.display());
                config
            }
            Ok(None) => {
                debug!("No scene config at {}; using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                warn!("{:#}; using default scene", err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        ensure!(self.sun.size > 0.0, "sun size must be positive");
        for body in [&self.earth, &self.moon] {
            ensure!(body.size > 0.0, "{} size must be positive", body.name);
            ensure!(body.distance >= 0.0, "{} distance must not be negative", body.name);
            ensure!(
                ROUGHNESS_RANGE.contains(&body.roughness),
                "{} roughness must be within 0..=1",
                body.name
            );
        }
        let camera = &self.camera;
        ensure!(
            camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0,
            "camera fov must be within (0, 180) degrees"
        );
        ensure!(
            camera.near > 0.0 && camera.near < camera.far,
            "camera planes must satisfy 0 < near < far"
        );
        ensure!(
            self.backdrop.radius > camera.near && self.backdrop.radius < camera.far,
            "backdrop radius must lie between the camera planes"
        );
        ensure!(
            self.lights.ambient_brightness >= 0.0,
            "ambient brightness must not be negative"
        );
        // The panel slider can only reach this range.
        ensure!(
            SUN_INTENSITY_RANGE.contains(&self.lights.sun_intensity),
            "sun intensity must be within 0..=1000"
        );
        ensure!(self.lights.shadow_map_size > 0, "shadow map size must be positive");
        ensure!(
            (0.0..=1.0).contains(&self.lights.spot_penumbra),
            "spot penumbra must be within 0..=1"
        );
        ensure!(self.max_pixel_ratio >= 1.0, "max pixel ratio must be at least 1");
        ensure!(self.tick_limit != Some(0), "tick limit must be at least 1");
        Ok(())
    }
}
