use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::camera::CameraUniform;
use crate::components::renderable::RenderKind;

/// One entry of the per-frame draw list, read by the JS renderer.
/// 20 floats = 80 bytes stride.
///
/// Geometry is not repeated per frame: `slot` indexes the static geometry
/// list handed over once after composition.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct DrawInstance {
    /// World matrix, column-major.
    pub model: [[f32; 4]; 4],
    /// [`RenderKind`] as u32.
    pub kind: u32,
    /// Index into the static geometry list.
    pub slot: u32,
    /// Whole-draw opacity.
    pub opacity: f32,
    pub _pad: f32,
}

impl DrawInstance {
    pub const FLOATS: usize = 20;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(model: &Mat4, kind: RenderKind, slot: u32, opacity: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            kind: kind as u32,
            slot,
            opacity,
            _pad: 0.0,
        }
    }
}

/// Draw list plus camera uniform for one frame.
#[derive(Debug)]
pub struct DrawBuffer {
    pub camera: CameraUniform,
    pub instances: Vec<DrawInstance>,
}

impl DrawBuffer {
    pub fn new() -> Self {
        Self {
            camera: CameraUniform::zeroed(),
            instances: Vec::with_capacity(64),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: DrawInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for zero-copy reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Raw pointer to the camera uniform ([`CameraUniform::FLOATS`] floats).
    pub fn camera_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<CameraUniform, f32>(std::slice::from_ref(&self.camera)).as_ptr()
    }
}

impl Default for DrawBuffer {
    fn default() -> Self {
        Self::new()
    }
}
