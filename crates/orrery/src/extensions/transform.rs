// extensions/transform.rs
//
// Local transforms for scene-tree nodes and their composition into world
// matrices. Parent-child structure itself lives in `SceneNode`; this file
// is only the math.
//
// Usage:
//   let local = LocalTransform::new().with_translation(Vec3::new(2.6, 0.0, 0.0));
//   let world = compose_world(&parent_world, &local);

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, orientation and scale of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Position relative to parent.
    pub translation: Vec3,
    /// Rotation relative to parent.
    pub rotation: Quat,
    /// Scale multiplier relative to parent.
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::splat(scale))
    }

    /// Replace the rotation with a pure rotation about +Y.
    pub fn set_yaw(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_y(angle);
    }

    /// Rotation about +Y in (-π, π], assuming the rotation is a pure yaw.
    pub fn yaw(&self) -> f32 {
        let (yaw, _, _) = self.rotation.to_euler(EulerRot::YXZ);
        yaw
    }

    /// Local-to-parent matrix (scale, then rotate, then translate).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// World matrix of a node given its parent's world matrix.
#[inline]
pub fn compose_world(parent_world: &Mat4, local: &LocalTransform) -> Mat4 {
    *parent_world * local.matrix()
}

/// World-space origin of a node.
#[inline]
pub fn world_origin(world: &Mat4) -> Vec3 {
    world.w_axis.truncate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn child_offset_adds_to_parent() {
        let parent = LocalTransform::new().with_translation(Vec3::new(100.0, 100.0, 0.0));
        let child = LocalTransform::new().with_translation(Vec3::new(50.0, 0.0, 0.0));

        let parent_world = compose_world(&Mat4::IDENTITY, &parent);
        let child_world = compose_world(&parent_world, &child);

        assert!(world_origin(&child_world).abs_diff_eq(Vec3::new(150.0, 100.0, 0.0), 1e-4));
    }

    #[test]
    fn parent_yaw_swings_child_around_vertical_axis() {
        let mut holder = LocalTransform::new();
        holder.set_yaw(FRAC_PI_2);
        let body = LocalTransform::new().with_translation(Vec3::new(2.0, 0.0, 0.0));

        let world = compose_world(&compose_world(&Mat4::IDENTITY, &holder), &body);

        // +X rotated a quarter turn about +Y lands on -Z (right-handed).
        assert!(world_origin(&world).abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-5));
    }

    #[test]
    fn yaw_round_trips_through_quaternion() {
        let mut t = LocalTransform::new();
        t.set_yaw(2.5);
        assert!((t.yaw() - 2.5).abs() < 1e-5);
    }

    #[test]
    fn scale_does_not_move_origin() {
        let t = LocalTransform::new()
            .with_translation(Vec3::new(1.0, 2.0, 3.0))
            .with_uniform_scale(0.25);
        assert!(world_origin(&t.matrix()).abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));
    }
}
