// extensions/tween.rs
//
// One-shot vector tween. Drives the camera's click-to-focus flight.
//
// Usage:
//   let mut tween = Tween::new(from, to, 2.0, Easing::QuadOut);
//   let pos = tween.advance(dt);   // eased position after `dt` more seconds
//   if tween.is_complete() { ... }

use glam::Vec3;

use super::easing::{ease_vec3, Easing};

/// A single point-to-point animation over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// Start value.
    pub from: Vec3,
    /// End value.
    pub to: Vec3,
    /// Duration in seconds.
    pub duration: f32,
    /// Elapsed time, never beyond `duration`.
    pub elapsed: f32,
    /// Easing function.
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Current interpolated value.
    pub fn value(&self) -> Vec3 {
        ease_vec3(self.from, self.to, self.progress(), self.easing)
    }

    /// Advance by `dt` seconds and return the new value.
    /// Negative deltas are ignored.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    /// Whether the tween has reached its end value.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_position() {
        let mut tween = Tween::new(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 1.0, Easing::Linear);

        // Tick halfway
        let pos = tween.advance(0.5);
        assert!((pos.x - 50.0).abs() < 0.01);
        assert!(!tween.is_complete());

        // Tick to completion
        let pos = tween.advance(0.5);
        assert!((pos.x - 100.0).abs() < 0.01);
        assert!(tween.is_complete());
    }

    #[test]
    fn overshooting_dt_clamps_at_target() {
        let to = Vec3::new(1.0, 2.0, 3.0);
        let mut tween = Tween::new(Vec3::ZERO, to, 2.0, Easing::QuadOut);
        assert_eq!(tween.advance(5.0), to);
        assert_eq!(tween.elapsed, 2.0);
    }

    #[test]
    fn zero_duration_is_immediately_complete() {
        let to = Vec3::new(-4.0, 0.0, 1.0);
        let tween = Tween::new(Vec3::ONE, to, 0.0, Easing::Linear);
        assert!(tween.is_complete());
        assert_eq!(tween.value(), to);
    }

    #[test]
    fn negative_dt_does_not_rewind() {
        let mut tween = Tween::new(Vec3::ZERO, Vec3::X, 1.0, Easing::Linear);
        tween.advance(0.4);
        tween.advance(-1.0);
        assert!((tween.elapsed - 0.4).abs() < 1e-6);
    }
}
