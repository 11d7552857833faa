//! Camera targets for focus-centering.

use serde::{Deserialize, Serialize};

/// A point in renderer space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

/// Camera and viewport motion parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// 3D: distance kept between camera and the focused concept.
    pub focus_distance: f64,
    pub focus_duration_ms: u32,
    /// 2D: zoom applied when centering on a concept.
    pub center_zoom: f64,
    pub center_duration_ms: u32,
    /// Padding around the graph on a view reset.
    pub fit_padding: u32,
    pub fit_duration_ms: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            focus_distance: 200.0,
            focus_duration_ms: 1000,
            center_zoom: 1.5,
            center_duration_ms: 500,
            fit_padding: 50,
            fit_duration_ms: 500,
        }
    }
}

impl CameraConfig {
    /// Camera position looking at `target` from `focus_distance` further out
    /// along the ray from the origin.
    ///
    /// A target at the origin has no ray; the camera then sits on the z axis.
    pub fn focus_position(&self, target: Vec3) -> Vec3 {
        let length = target.length();
        if length <= f64::EPSILON {
            return Vec3::new(0.0, 0.0, self.focus_distance);
        }
        target.scale(1.0 + self.focus_distance / length)
    }
}
