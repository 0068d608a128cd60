// extensions/orbit_controls.rs
//
// Damped drag-to-orbit controller for the free camera.
// Spherical coordinates around a target point; input accumulates into a
// pending delta that bleeds into the pose a fraction per update.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Keeps the polar angle away from the poles so `look_at` stays defined.
const POLAR_EPSILON: f32 = 1e-3;

/// Tuning for [`OrbitControls`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Fraction of the pending motion applied per update (0 < d ≤ 1).
    pub damping: f32,
    /// Radians of rotation per NDC unit of drag, before the π factor.
    pub rotate_speed: f32,
    /// Multiplicative distance change per wheel notch.
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            damping: 0.03,
            rotate_speed: 1.0,
            zoom_step: 0.95,
            min_distance: 0.5,
            max_distance: 60.0,
        }
    }
}

/// Orbit-style camera controller around `target`.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub config: ControlsConfig,
    /// Point the camera orbits and looks at.
    pub target: Vec3,
    distance: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    azimuth: f32,
    /// Polar angle from +Y.
    polar: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_zoom: f32,
}

impl OrbitControls {
    pub fn new(config: ControlsConfig) -> Self {
        Self {
            config,
            target: Vec3::ZERO,
            distance: 1.0,
            azimuth: 0.0,
            polar: PI / 2.0,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_zoom: 1.0,
        }
    }

    /// Adopt the camera's current pose so the hand-off is seamless.
    pub fn sync(&mut self, position: Vec3, target: Vec3) {
        let offset = position - target;
        self.target = target;
        self.distance = offset.length().max(f32::EPSILON);
        self.azimuth = offset.x.atan2(offset.z);
        self.polar = (offset.y / self.distance).clamp(-1.0, 1.0).acos();
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_zoom = 1.0;
    }

    /// Queue a drag given in NDC units (full screen height = 2).
    pub fn drag(&mut self, delta_ndc_x: f32, delta_ndc_y: f32) {
        let k = PI * self.config.rotate_speed;
        // Dragging right swings the camera left around the target.
        self.pending_azimuth -= delta_ndc_x * k;
        // NDC y grows upward; dragging up lowers the camera.
        self.pending_polar += delta_ndc_y * k;
    }

    /// Queue a zoom. Positive notches move the camera closer.
    pub fn wheel(&mut self, notches: f32) {
        self.pending_zoom *= self.config.zoom_step.powf(notches);
    }

    /// Apply a damped share of the pending motion and return the new position.
    pub fn update(&mut self) -> Vec3 {
        let d = self.config.damping.clamp(f32::EPSILON, 1.0);

        self.azimuth += self.pending_azimuth * d;
        self.polar = (self.polar + self.pending_polar * d).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.pending_azimuth *= 1.0 - d;
        self.pending_polar *= 1.0 - d;

        let zoom_now = self.pending_zoom.powf(d);
        self.distance = (self.distance * zoom_now)
            .clamp(self.config.min_distance, self.config.max_distance);
        self.pending_zoom /= zoom_now;

        self.position()
    }

    /// Current camera position implied by the spherical pose.
    pub fn position(&self) -> Vec3 {
        let s = self.polar.sin();
        self.target
            + Vec3::new(
                self.distance * s * self.azimuth.sin(),
                self.distance * self.polar.cos(),
                self.distance * s * self.azimuth.cos(),
            )
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(ControlsConfig::default())
    }
}
