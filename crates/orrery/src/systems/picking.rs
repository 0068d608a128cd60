//! Ray picking against the live scene tree and the hover label it drives.
//!
//! Only surfaces are tested: spheres and rim shells as unit spheres, tori
//! as a flat annulus in their local XY plane, instanced clusters as one
//! bounding sphere per instance. Lines, points and sprites never block.

use glam::{Mat4, Vec2, Vec3};

use crate::components::node::SceneNode;
use crate::components::renderable::Renderable;
use crate::extensions::transform::{compose_world, world_origin};
use crate::renderer::camera::PerspectiveCamera;

/// A world-space ray with a unit direction, so hit parameters are distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Returns `None` when `direction` has no length.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        direction.try_normalize().map(|direction| Self { origin, direction })
    }

    /// Ray from the camera through a pointer position in NDC
    /// (x right, y up, both in [-1, 1]).
    pub fn from_ndc(camera: &PerspectiveCamera, ndc: Vec2) -> Option<Self> {
        let inverse = camera.view_projection().inverse();
        if !inverse.is_finite() {
            return None;
        }
        let far = inverse.project_point3(ndc.extend(1.0));
        Self::new(camera.position, far - camera.position)
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// The entity under the pointer this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    pub entity_name: String,
    /// World position of the named node (not of the hit point).
    pub world_position: Vec3,
    /// Distance along the ray to the surface that was hit.
    pub distance: f32,
}

/// Smallest non-negative `s` with `|origin + s * dir - center| = radius`.
/// `dir` need not be unit length.
fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let a = dir.length_squared();
    if a <= f32::EPSILON {
        return None;
    }
    let half_b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let disc = half_b * half_b - a * c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let near = (-half_b - root) / a;
    if near >= 0.0 {
        return Some(near);
    }
    let far = (-half_b + root) / a;
    (far >= 0.0).then_some(far)
}

/// Hit against the annulus `inner <= |p.xy| <= outer` in the plane z = 0.
fn ray_annulus(origin: Vec3, dir: Vec3, inner: f32, outer: f32) -> Option<f32> {
    if dir.z.abs() <= f32::EPSILON {
        return None;
    }
    let s = -origin.z / dir.z;
    if s < 0.0 {
        return None;
    }
    let p = origin + dir * s;
    let r = p.truncate().length();
    (r >= inner && r <= outer).then_some(s)
}

/// Closest hit on one renderable, given the ray already in the node's local space.
fn intersect_local(renderable: &Renderable, origin: Vec3, dir: Vec3) -> Option<f32> {
    match renderable {
        Renderable::Sphere { .. } | Renderable::RimShell { .. } => ray_sphere(origin, dir, Vec3::ZERO, 1.0),
        Renderable::Torus { major_radius, minor_radius, .. } => ray_annulus(
            origin,
            dir,
            (major_radius - minor_radius).max(0.0),
            major_radius + minor_radius,
        ),
        Renderable::Instanced { bounding_radius, instances, .. } => instances
            .iter()
            .filter_map(|inst| ray_sphere(origin, dir, inst.position, bounding_radius * inst.scale))
            .min_by(f32::total_cmp),
        Renderable::LineLoop { .. }
        | Renderable::LineStrip { .. }
        | Renderable::Points { .. }
        | Renderable::Sprites { .. } => None,
    }
}

struct Best<'a> {
    distance: f32,
    named: Option<(&'a str, Vec3)>,
}

fn pick_recursive<'a>(
    node: &'a SceneNode,
    parent_world: &Mat4,
    named: Option<(&'a str, Vec3)>,
    ray: &Ray,
    best: &mut Option<Best<'a>>,
) {
    let world = compose_world(parent_world, &node.local);
    let named = if node.is_named() {
        Some((node.name.as_str(), world_origin(&world)))
    } else {
        named
    };

    if let Some(renderable) = &node.renderable {
        let inverse = world.inverse();
        if inverse.is_finite() {
            let origin = inverse.transform_point3(ray.origin);
            let dir = inverse.transform_vector3(ray.direction);
            if let Some(distance) = intersect_local(renderable, origin, dir) {
                // Ties keep the earlier node in traversal order.
                if best.as_ref().map_or(true, |b| distance < b.distance) {
                    *best = Some(Best { distance, named });
                }
            }
        }
    }

    for child in &node.children {
        pick_recursive(child, &world, named, ray, best);
    }
}

/// Closest surface hit along `ray`, resolved to the nearest named node on
/// the path from the hit node up to the root. `None` if nothing is hit or
/// the closest hit has no named ancestor.
pub fn pick(root: &SceneNode, ray: &Ray) -> Option<Pick> {
    let mut best = None;
    pick_recursive(root, &Mat4::IDENTITY, None, ray, &mut best);
    let best = best?;
    let (name, world_position) = best.named?;
    Some(Pick {
        entity_name: name.to_string(),
        world_position,
        distance: best.distance,
    })
}

/// Tooltip state for the UI: the hovered entity's label, if any, and where
/// the pointer was when it was computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverState {
    pub label: Option<String>,
    pub pointer_ndc: Option<Vec2>,
}

impl HoverState {
    /// Replace the hover with this frame's pick. Never carries over old labels.
    pub fn update(&mut self, pick: Option<&Pick>, pointer_ndc: Option<Vec2>) {
        self.label = pick.map(|p| p.entity_name.clone());
        self.pointer_ndc = pointer_ndc;
    }

    pub fn is_visible(&self) -> bool {
        self.label.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::Quat;

    use super::*;
    use crate::assets::registry::MeshHandle;
    use crate::components::renderable::Rgb;
    use crate::extensions::transform::LocalTransform;
    use crate::renderer::camera::CameraConfig;
    use crate::systems::geometry::InstanceTransform;

    fn sphere() -> Renderable {
        Renderable::Sphere { texture: None, emissive: false }
    }

    fn body(name: &str, at: Vec3, size: f32) -> SceneNode {
        SceneNode::new()
            .with_name(name)
            .with_local(LocalTransform::new().with_translation(at).with_uniform_scale(size))
            .with_renderable(sphere())
    }

    fn camera_on_z(distance: f32) -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::new(&CameraConfig::default(), 1.0);
        cam.position = Vec3::new(0.0, 0.0, distance);
        cam.look_at(Vec3::ZERO);
        cam
    }

    fn down_at(x: f32) -> Ray {
        Ray::new(Vec3::new(x, 5.0, 0.0), Vec3::NEG_Y).unwrap()
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = camera_on_z(5.0);
        let ray = Ray::from_ndc(&cam, Vec2::ZERO).unwrap();
        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn hit_reports_name_world_position_and_distance() {
        let root = SceneNode::new().with_child(body("Sun", Vec3::ZERO, 1.0));
        let ray = Ray::from_ndc(&camera_on_z(5.0), Vec2::ZERO).unwrap();
        let hit = pick(&root, &ray).unwrap();
        assert_eq!(hit.entity_name, "Sun");
        assert!(hit.world_position.abs_diff_eq(Vec3::ZERO, 1e-6));
        assert!((hit.distance - 4.0).abs() < 1e-4);
    }

    #[test]
    fn closest_hit_wins_regardless_of_order() {
        let far = body("Far", Vec3::ZERO, 1.0);
        let near = body("Near", Vec3::new(0.0, 0.0, 2.0), 0.5);
        let ray = Ray::from_ndc(&camera_on_z(5.0), Vec2::ZERO).unwrap();

        let a = SceneNode::new().with_child(body("Far", Vec3::ZERO, 1.0)).with_child(near);
        let b = SceneNode::new()
            .with_child(body("Near", Vec3::new(0.0, 0.0, 2.0), 0.5))
            .with_child(far);
        assert_eq!(pick(&a, &ray).unwrap().entity_name, "Near");
        assert_eq!(pick(&b, &ray).unwrap().entity_name, "Near");
    }

    #[test]
    fn unnamed_child_resolves_to_named_ancestor() {
        let holder = SceneNode::new().with_child(
            body("Mars", Vec3::new(0.0, 0.0, 0.0), 0.5).with_child(
                SceneNode::new()
                    .with_local(LocalTransform::new().with_uniform_scale(1.01))
                    .with_renderable(Renderable::RimShell { rim: Rgb::WHITE, facing: Rgb::new(0.0, 0.0, 0.0) }),
            ),
        );
        let root = SceneNode::new().with_child(holder);
        let ray = Ray::from_ndc(&camera_on_z(5.0), Vec2::ZERO).unwrap();
        let hit = pick(&root, &ray).unwrap();
        // The rim shell is hit first but reports its body.
        assert_eq!(hit.entity_name, "Mars");
        assert!((hit.distance - (5.0 - 0.505)).abs() < 1e-4);
    }

    #[test]
    fn closest_unnamed_hit_yields_none() {
        let cluster = SceneNode::new().with_renderable(Renderable::Instanced {
            mesh: MeshHandle(0),
            bounding_radius: 1.0,
            instances: vec![InstanceTransform {
                position: Vec3::new(0.0, 0.0, 3.0),
                orientation: Quat::IDENTITY,
                scale: 0.2,
            }],
        });
        let root = SceneNode::new().with_child(body("Sun", Vec3::ZERO, 1.0)).with_child(cluster);
        let ray = Ray::from_ndc(&camera_on_z(5.0), Vec2::ZERO).unwrap();
        assert!(pick(&root, &ray).is_none());
    }

    #[test]
    fn miss_yields_none() {
        let root = SceneNode::new().with_child(body("Sun", Vec3::ZERO, 1.0));
        let ray = Ray::from_ndc(&camera_on_z(5.0), Vec2::new(0.9, 0.9)).unwrap();
        assert!(pick(&root, &ray).is_none());
    }

    #[test]
    fn lines_do_not_block() {
        let guide = SceneNode::new().with_renderable(Renderable::LineLoop {
            points: vec![Vec3::new(-1.0, 0.0, 3.0), Vec3::new(1.0, 0.0, 3.0)],
            color: Rgb::WHITE,
            opacity: 0.2,
        });
        let root = SceneNode::new().with_child(guide).with_child(body("Sun", Vec3::ZERO, 1.0));
        let ray = Ray::from_ndc(&camera_on_z(5.0), Vec2::ZERO).unwrap();
        assert_eq!(pick(&root, &ray).unwrap().entity_name, "Sun");
    }

    #[test]
    fn tilted_ring_is_an_annulus() {
        let ring = SceneNode::new()
            .with_name("Saturn")
            .with_local(
                LocalTransform::new()
                    .with_rotation(Quat::from_rotation_x(FRAC_PI_2))
                    .with_scale(Vec3::new(1.0, 1.0, 0.1)),
            )
            .with_renderable(Renderable::Torus {
                major_radius: 0.4,
                minor_radius: 0.1,
                color: Rgb::WHITE,
                opacity: 1.0,
            });
        let root = SceneNode::new().with_child(ring);

        let hit = pick(&root, &down_at(0.4)).unwrap();
        assert_eq!(hit.entity_name, "Saturn");
        assert!((hit.distance - 5.0).abs() < 1e-4);
        // Through the hole and past the rim.
        assert!(pick(&root, &down_at(0.0)).is_none());
        assert!(pick(&root, &down_at(0.6)).is_none());
    }

    #[test]
    fn pick_is_deterministic() {
        let root = SceneNode::new()
            .with_child(body("A", Vec3::new(0.3, 0.0, 0.0), 0.5))
            .with_child(body("B", Vec3::new(-0.3, 0.0, 0.0), 0.5));
        let ray = Ray::from_ndc(&camera_on_z(5.0), Vec2::new(0.01, 0.0)).unwrap();
        let first = pick(&root, &ray);
        for _ in 0..10 {
            assert_eq!(pick(&root, &ray), first);
        }
    }

    #[test]
    fn hover_never_keeps_stale_label() {
        let mut hover = HoverState::default();
        let p = Pick { entity_name: "Venus".into(), world_position: Vec3::ZERO, distance: 1.0 };
        hover.update(Some(&p), Some(Vec2::new(0.1, 0.2)));
        assert_eq!(hover.label.as_deref(), Some("Venus"));
        assert!(hover.is_visible());
        hover.update(None, Some(Vec2::new(0.5, 0.5)));
        assert!(!hover.is_visible());
        assert_eq!(hover.pointer_ndc, Some(Vec2::new(0.5, 0.5)));
    }
}
