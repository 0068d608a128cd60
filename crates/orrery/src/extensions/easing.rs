// extensions/easing.rs
//
// Pure easing functions for camera and tween interpolation.
// No dependencies on SceneNode/Scene, just math.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity (no easing).
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end. Matches the default feel of browser tween libraries.
    #[default]
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    /// Stronger slow end.
    CubicOut,
    /// Stronger slow start and end.
    CubicInOut,
    /// Sine wave easing (smooth).
    SineInOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Every variant maps 0 to 0 and 1 to 1 exactly.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            // Quadratic
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            // Cubic
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }

            Easing::SineInOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    -((PI * t).cos() - 1.0) / 2.0
                }
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two points. Returns `b` exactly at `t == 1`.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    if t >= 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

/// Interpolate Vec3 with easing.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}
