//! Pixel-to-canvas mapping for construction input.
//!
//! Raw pixel positions are snapped to a coarse grid before being mapped into
//! normalized device coordinates, so clicks land on reproducible positions.

use crate::geometry::PICK_TOLERANCE;
use serde::{Deserialize, Serialize};

/// Canvas geometry and input resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Grid size in pixels that clicks snap to
    pub snap_resolution: u32,
    /// Hit-test tolerance in normalized device units
    pub pick_tolerance: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            snap_resolution: 10,
            pick_tolerance: PICK_TOLERANCE,
        }
    }
}

impl CanvasConfig {
    /// Round a pixel coordinate to the nearest grid line.
    pub fn snap(&self, pixel: u32) -> u32 {
        let res = self.snap_resolution.max(1);
        (pixel.saturating_add(res / 2) / res).saturating_mul(res)
    }

    /// Whether a pixel lies on the window, edges included.
    pub fn contains_pixel(&self, px: u32, py: u32) -> bool {
        px <= self.width && py <= self.height
    }

    /// Map a window pixel (origin top-left, y down) to normalized device
    /// coordinates (origin center, y up). Pixels past the window edge are
    /// clamped onto it.
    pub fn map_pixel(&self, px: u32, py: u32) -> [f64; 2] {
        let width = self.width.max(1);
        let height = self.height.max(1);
        let sx = self.snap(px.min(width)).min(width);
        let sy = self.snap(py.min(height)).min(height);
        let x = 2.0 * sx as f64 / width as f64 - 1.0;
        let y = 1.0 - 2.0 * sy as f64 / height as f64;
        [x, y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        let config = CanvasConfig::default();
        assert_eq!(config.snap(0), 0);
        assert_eq!(config.snap(4), 0);
        assert_eq!(config.snap(5), 10);
        assert_eq!(config.snap(14), 10);
        assert_eq!(config.snap(596), 600);
    }

    #[test]
    fn test_map_pixel_corners_and_center() {
        let config = CanvasConfig::default();
        assert_eq!(config.map_pixel(0, 0), [-1.0, 1.0]);
        assert_eq!(config.map_pixel(600, 600), [1.0, -1.0]);
        assert_eq!(config.map_pixel(300, 300), [0.0, 0.0]);
    }

    #[test]
    fn test_map_pixel_snaps_before_mapping() {
        let config = CanvasConfig::default();
        // 362 snaps to 360, 244 snaps to 240
        let [x, y] = config.map_pixel(362, 244);
        assert!((x - 0.2).abs() < 1e-12);
        assert!((y - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_snap_resolution_zero_is_identity() {
        let config = CanvasConfig { snap_resolution: 0, ..CanvasConfig::default() };
        assert_eq!(config.snap(123), 123);
    }

    #[test]
    fn test_far_pixels_clamp_to_canvas_edge() {
        let config = CanvasConfig::default();
        assert_eq!(config.snap(u32::MAX), u32::MAX / 10 * 10);
        assert_eq!(config.map_pixel(u32::MAX, 0), [1.0, 1.0]);
        assert_eq!(config.map_pixel(0, u32::MAX), [-1.0, -1.0]);
        assert_eq!(config.map_pixel(601, 300), [1.0, 0.0]);

        assert!(config.contains_pixel(600, 600));
        assert!(!config.contains_pixel(601, 0));
        assert!(!config.contains_pixel(0, u32::MAX));
    }
}
