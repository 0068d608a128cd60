//! Render collaborator contract.
//!
//! The core never rasterizes. Each frame it hands a [`FrameView`] to a
//! [`RenderSink`]: in the browser that is the [`DrawBuffer`] the JS renderer
//! reads through raw pointers, in tests it can be anything that records.

use super::camera::CameraUniform;
use super::instance::{DrawBuffer, DrawInstance};
use crate::core::scene::Scene;
use crate::systems::picking::HoverState;

/// Everything a renderer needs for one frame.
pub struct FrameView<'a> {
    pub camera: CameraUniform,
    /// World transforms of every renderable node, in static-geometry order.
    pub draw_list: &'a [DrawInstance],
    pub scene: &'a Scene,
    pub hover: &'a HoverState,
}

/// Receives one [`FrameView`] per frame.
pub trait RenderSink {
    fn render(&mut self, frame: &FrameView);
}

impl RenderSink for DrawBuffer {
    fn render(&mut self, frame: &FrameView) {
        self.camera = frame.camera;
        self.instances.clear();
        self.instances.extend_from_slice(frame.draw_list);
    }
}
