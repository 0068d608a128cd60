//! Procedural geometry: orbit rings, guide curves, scattered instances,
//! the background star field and haze sprites.
//!
//! Everything here is a pure function of its parameters and the injected
//! random source, so a seeded `Rng` reproduces a scene exactly.

use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::renderable::Rgb;
use crate::systems::rng::{centered_jitter, uniform_between};

/// Scattered instances never shrink below this scale.
pub const MIN_INSTANCE_SCALE: f32 = 1e-3;

/// Baked placement of one instance in a batched draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InstanceTransform {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: f32,
}

impl InstanceTransform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.orientation, self.position)
    }
}

/// Points and per-point colors of a guide curve.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideCurve {
    pub points: Vec<Vec3>,
    pub colors: Vec<Rgb>,
    /// Line width, uniform in `[GUIDE_WIDTH_MIN, GUIDE_WIDTH_MAX)`.
    pub width: f32,
}

pub const GUIDE_WIDTH_MIN: f32 = 0.75;
pub const GUIDE_WIDTH_MAX: f32 = 1.25;

/// One background star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Star {
    pub position: Vec3,
    pub color: Rgb,
}

/// One camera-facing haze billboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HazeSprite {
    pub position: Vec3,
    pub size: f32,
    pub color: Rgb,
    pub opacity: f32,
    /// Roll about the view axis, radians.
    pub rotation: f32,
}

/// Parameters for [`generate_star_field`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldConfig {
    pub count: usize,
    /// Point size passed through to the renderer.
    pub size: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub hue: f32,
    pub saturation: f32,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            count: 800,
            size: 0.25,
            min_radius: 25.0,
            max_radius: 50.0,
            hue: 0.6,
            saturation: 0.2,
        }
    }
}

/// One layer of haze sprites, see [`generate_haze_sprites`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazeLayer {
    pub hue: f32,
    pub num_sprites: usize,
    pub opacity: f32,
    pub radius: f32,
    pub size: f32,
    pub z: f32,
}

impl Default for HazeLayer {
    fn default() -> Self {
        Self {
            hue: 0.6,
            num_sprites: 8,
            opacity: 0.2,
            radius: 30.0,
            size: 60.0,
            z: -40.0,
        }
    }
}

/// Point on the horizontal circle of `radius` at `angle`.
#[inline]
fn on_circle(radius: f32, angle: f32) -> Vec3 {
    Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
}

/// `segment_count` evenly spaced points on the horizontal circle of `radius`.
/// The loop is closed implicitly: the renderer joins the last point to the first.
pub fn generate_ring_curve(radius: f32, segment_count: usize) -> Vec<Vec3> {
    (0..segment_count)
        .map(|i| on_circle(radius, i as f32 / segment_count as f32 * TAU))
        .collect()
}

/// A closed strip of `segment_count + 1` points around the horizontal circle,
/// each radius perturbed by uniform noise in `[-jitter/2, jitter/2]`.
/// The final point revisits angle 2π so the strip closes on itself.
/// `color_fn` receives the point index.
pub fn generate_guide_curve<R, F>(
    base_radius: f32,
    jitter_amplitude: f32,
    segment_count: usize,
    mut color_fn: F,
    rng: &mut R,
) -> GuideCurve
where
    R: Rng + ?Sized,
    F: FnMut(usize) -> Rgb,
{
    if segment_count == 0 {
        return GuideCurve { points: Vec::new(), colors: Vec::new(), width: GUIDE_WIDTH_MIN };
    }

    let mut points = Vec::with_capacity(segment_count + 1);
    let mut colors = Vec::with_capacity(segment_count + 1);
    for i in 0..=segment_count {
        let angle = i as f32 / segment_count as f32 * TAU;
        let radius = base_radius + centered_jitter(rng, jitter_amplitude);
        points.push(on_circle(radius, angle));
        colors.push(color_fn(i));
    }
    let width = rng.gen_range(GUIDE_WIDTH_MIN..GUIDE_WIDTH_MAX);
    GuideCurve { points, colors, width }
}

/// Color of the `index`-th of `count` guide curves, ordered by distance.
/// Hue and lightness both fall linearly with the index, so inner curves
/// are lighter and warmer.
pub fn guide_curve_color(index: usize, count: usize) -> Rgb {
    let f = if count == 0 { 0.0 } else { index as f32 / count as f32 };
    let hue = 0.25 - f * 0.27;
    let lightness = 0.5 - f * 0.3;
    Rgb::from_hsl(hue, 1.0, lightness)
}

/// Uniformly distributed orientation (Shoemake's method).
pub fn random_orientation<R: Rng + ?Sized>(rng: &mut R) -> Quat {
    let u1: f32 = rng.gen();
    let u2: f32 = rng.gen::<f32>() * TAU;
    let u3: f32 = rng.gen::<f32>() * TAU;
    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();
    Quat::from_xyzw(a * u2.sin(), a * u2.cos(), b * u3.sin(), b * u3.cos()).normalize()
}

/// `count` instances at uniform angles in `[0, 2π)` and uniform radii in
/// `[min_radius, max_radius]` on the horizontal plane, with random
/// orientation and a jittered, strictly positive scale.
pub fn generate_scatter_field<R: Rng + ?Sized>(
    count: usize,
    min_radius: f32,
    max_radius: f32,
    size_base: f32,
    size_jitter: f32,
    rng: &mut R,
) -> Vec<InstanceTransform> {
    (0..count)
        .map(|_| {
            let angle = rng.gen_range(0.0..TAU);
            let radius = uniform_between(rng, min_radius, max_radius);
            let orientation = random_orientation(rng);
            let scale = (size_base + centered_jitter(rng, size_jitter)).max(MIN_INSTANCE_SCALE);
            InstanceTransform {
                position: on_circle(radius, angle),
                orientation,
                scale,
            }
        })
        .collect()
}

/// Stars spread uniformly over directions, at radii in the configured shell.
pub fn generate_star_field<R: Rng + ?Sized>(config: &StarFieldConfig, rng: &mut R) -> Vec<Star> {
    (0..config.count)
        .map(|_| {
            let radius = uniform_between(rng, config.min_radius, config.max_radius);
            // Uniform on the sphere: uniform azimuth, uniform cos(polar).
            let azimuth = rng.gen_range(0.0..TAU);
            let cos_polar: f32 = rng.gen_range(-1.0..=1.0);
            let sin_polar = (1.0 - cos_polar * cos_polar).max(0.0).sqrt();
            let position = Vec3::new(
                radius * sin_polar * azimuth.cos(),
                radius * sin_polar * azimuth.sin(),
                radius * cos_polar,
            );
            let lightness = rng.gen_range(0.25..1.0);
            Star {
                position,
                color: Rgb::from_hsl(config.hue, config.saturation, lightness),
            }
        })
        .collect()
}

/// Sprites evenly spaced on a ring of `layer.radius` in the plane `z = layer.z`,
/// with slight hue and depth variation and a random roll.
pub fn generate_haze_sprites<R: Rng + ?Sized>(layer: &HazeLayer, rng: &mut R) -> Vec<HazeSprite> {
    let n = layer.num_sprites;
    (0..n)
        .map(|i| {
            let angle = i as f32 / n as f32 * TAU;
            let position = Vec3::new(
                angle.cos() * layer.radius,
                angle.sin() * layer.radius,
                layer.z + centered_jitter(rng, 2.0),
            );
            let hue = layer.hue + centered_jitter(rng, 0.1);
            HazeSprite {
                position,
                size: layer.size,
                color: Rgb::from_hsl(hue, 1.0, 0.5),
                opacity: layer.opacity,
                rotation: rng.gen_range(0.0..TAU),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::rng::seeded_rng;

    fn horizontal_radius(p: Vec3) -> f32 {
        (p.x * p.x + p.z * p.z).sqrt()
    }

    #[test]
    fn ring_curve_is_evenly_spaced_on_circle() {
        let points = generate_ring_curve(2.2, 64);
        assert_eq!(points.len(), 64);
        assert!(points[0].abs_diff_eq(Vec3::new(2.2, 0.0, 0.0), 1e-6));
        for p in &points {
            assert!((horizontal_radius(*p) - 2.2).abs() < 1e-5);
            assert_eq!(p.y, 0.0);
        }
        let step = points[0].distance(points[1]);
        for w in points.windows(2) {
            assert!((w[0].distance(w[1]) - step).abs() < 1e-4);
        }
        // Closing edge has the same length as every other edge.
        assert!((points[63].distance(points[0]) - step).abs() < 1e-4);
    }

    #[test]
    fn ring_curve_with_no_segments_is_empty() {
        assert!(generate_ring_curve(1.0, 0).is_empty());
    }

    #[test]
    fn guide_curve_closes_and_respects_jitter() {
        let mut rng = seeded_rng(5);
        let curve = generate_guide_curve(4.1, 0.2, 30, |_| Rgb::WHITE, &mut rng);
        assert_eq!(curve.points.len(), 31);
        assert_eq!(curve.colors.len(), 31);
        assert!(curve.width >= GUIDE_WIDTH_MIN && curve.width < GUIDE_WIDTH_MAX);
        for p in &curve.points {
            let r = horizontal_radius(*p);
            assert!(r >= 4.1 - 0.1 - 1e-4 && r <= 4.1 + 0.1 + 1e-4, "radius {}", r);
        }
        // Last point sits on the same bearing as the first.
        let first = curve.points[0].normalize();
        let last = curve.points[30].normalize();
        assert!(first.abs_diff_eq(last, 1e-4));
    }

    #[test]
    fn guide_curve_passes_point_index_to_color_fn() {
        let mut rng = seeded_rng(1);
        let curve = generate_guide_curve(1.0, 0.0, 4, |i| Rgb::new(i as f32, 0.0, 0.0), &mut rng);
        let reds: Vec<f32> = curve.colors.iter().map(|c| c.r).collect();
        assert_eq!(reds, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        // No jitter means an exact circle.
        for p in &curve.points {
            assert!((horizontal_radius(*p) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn guide_colors_darken_with_distance() {
        let near = guide_curve_color(0, 8);
        let far = guide_curve_color(7, 8);
        let lum = |c: Rgb| c.r + c.g + c.b;
        assert!(lum(near) > lum(far));
    }

    #[test]
    fn scatter_positions_stay_inside_annulus() {
        let mut rng = seeded_rng(42);
        for &n in &[0usize, 1, 25, 300] {
            let field = generate_scatter_field(n, 5.1, 5.6, 0.035, 0.05, &mut rng);
            assert_eq!(field.len(), n);
            for inst in &field {
                let r = horizontal_radius(inst.position);
                assert!(r >= 5.1 - 1e-4 && r <= 5.6 + 1e-4, "radius {}", r);
                assert_eq!(inst.position.y, 0.0);
                assert!(inst.scale > 0.0);
                assert!((inst.orientation.length() - 1.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn scatter_scale_is_clamped_positive() {
        let mut rng = seeded_rng(9);
        let field = generate_scatter_field(200, 1.0, 2.0, 0.0, 1.0, &mut rng);
        assert!(field.iter().all(|i| i.scale >= MIN_INSTANCE_SCALE));
    }

    #[test]
    fn scatter_is_reproducible_with_fixed_seed() {
        let a = generate_scatter_field(30, 1.0, 2.0, 0.1, 0.02, &mut seeded_rng(77));
        let b = generate_scatter_field(30, 1.0, 2.0, 0.1, 0.02, &mut seeded_rng(77));
        assert_eq!(a, b);
    }

    #[test]
    fn star_field_lies_in_shell() {
        let config = StarFieldConfig::default();
        let stars = generate_star_field(&config, &mut seeded_rng(8));
        assert_eq!(stars.len(), 800);
        for star in &stars {
            let r = star.position.length();
            assert!(r >= 25.0 - 1e-3 && r <= 50.0 + 1e-3, "radius {}", r);
        }
    }

    #[test]
    fn haze_sprites_ring_the_layer_plane() {
        let layer = HazeLayer { z: 40.0, hue: 0.0, ..HazeLayer::default() };
        let sprites = generate_haze_sprites(&layer, &mut seeded_rng(2));
        assert_eq!(sprites.len(), 8);
        for s in &sprites {
            let planar = (s.position.x * s.position.x + s.position.y * s.position.y).sqrt();
            assert!((planar - 30.0).abs() < 1e-3);
            assert!((s.position.z - 40.0).abs() <= 1.0 + 1e-5);
            assert_eq!(s.opacity, 0.2);
        }
    }
}
