//! Render-surface bookkeeping for the primary window.

use bevy::prelude::*;

/// Current window size (logical pixels) and the pixel density the scene is drawn at.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            pixel_ratio: 1.0,
        }
    }
}

impl ViewportState {
    /// Build from a logical window size and device scale factor, capping the density.
    pub fn new(width: f32, height: f32, device_scale: f32, max_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: capped_pixel_ratio(device_scale, max_pixel_ratio),
        }
    }

    /// Like [`Self::new`], but `None` for a collapsed (minimized) window.
    pub fn from_window_size(
        width: f32,
        height: f32,
        device_scale: f32,
        max_pixel_ratio: f32,
    ) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self::new(width, height, device_scale, max_pixel_ratio))
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Target buffer size at the capped pixel density.
    ///
    /// Bevy sizes the swapchain from the window's own physical size, so on screens
    /// scaled above the cap this is smaller than the surface actually presented.
    pub fn buffer_size(&self) -> UVec2 {
        UVec2::new(
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        )
    }
}

pub fn capped_pixel_ratio(device_scale: f32, max_pixel_ratio: f32) -> f32 {
    device_scale.min(max_pixel_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_is_width_over_height() {
        let viewport = ViewportState::new(1920.0, 1080.0, 1.0, 2.0);
        assert!((viewport.aspect_ratio() - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn test_buffer_uses_device_scale_below_cap() {
        let viewport = ViewportState::new(800.0, 600.0, 1.5, 2.0);
        assert_eq!(viewport.pixel_ratio, 1.5);
        assert_eq!(viewport.buffer_size(), UVec2::new(1200, 900));
    }

    #[test]
    fn test_collapsed_window_has_no_viewport() {
        assert!(ViewportState::from_window_size(800.0, 0.0, 1.0, 2.0).is_none());
        assert!(ViewportState::from_window_size(0.0, 600.0, 1.0, 2.0).is_none());
        let viewport = ViewportState::from_window_size(800.0, 600.0, 1.0, 2.0).unwrap();
        assert!(viewport.aspect_ratio().is_finite());
    }

    #[test]
    fn test_buffer_density_is_capped() {
        let viewport = ViewportState::new(800.0, 600.0, 3.0, 2.0);
        assert_eq!(viewport.pixel_ratio, 2.0);
        assert_eq!(viewport.buffer_size(), UVec2::new(1600, 1200));
    }
}
