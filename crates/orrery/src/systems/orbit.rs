//! Orbiting bodies: a holder node that turns about +Y, carrying the body
//! at a fixed radial offset plus any decorations (rings) riding along.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec3;

use crate::components::node::{SceneNode, Updatable};
use crate::components::renderable::{Renderable, Rgb};
use crate::extensions::transform::LocalTransform;

/// Scale of the rim shell relative to its body.
pub const RIM_SHELL_SCALE: f32 = 1.01;

/// Per-body speed overrides, shared between the UI and every orbit behavior.
///
/// Cloning yields another handle to the same table. Bodies without an entry
/// fall back to their base speed.
#[derive(Debug, Clone, Default)]
pub struct SpeedTable {
    inner: Rc<RefCell<HashMap<String, f32>>>,
}

impl SpeedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override a body's speed. Any value is accepted, including zero and negatives.
    pub fn set(&self, name: &str, speed: f32) {
        self.inner.borrow_mut().insert(name.to_string(), speed);
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.inner.borrow().get(name).copied()
    }

    /// Drop an override so the body returns to its base speed.
    pub fn remove(&self, name: &str) -> Option<f32> {
        self.inner.borrow_mut().remove(name)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

/// Sets the holder's yaw to `t * speed`, where speed is looked up in the
/// table on every call. The angle is a function of absolute time, so a
/// speed change moves the body to where that speed would have put it.
#[derive(Debug)]
pub struct OrbitBehavior {
    name: String,
    base_speed: f32,
    speeds: SpeedTable,
}

impl OrbitBehavior {
    pub fn new(name: impl Into<String>, base_speed: f32, speeds: SpeedTable) -> Self {
        Self {
            name: name.into(),
            base_speed,
            speeds,
        }
    }

    pub fn effective_speed(&self) -> f32 {
        self.speeds.get(&self.name).unwrap_or(self.base_speed)
    }
}

impl Updatable for OrbitBehavior {
    fn update(&mut self, t: f32, local: &mut LocalTransform) {
        local.set_yaw(t * self.effective_speed());
    }
}

/// Constant-rate yaw, used for the debris clusters.
#[derive(Debug, Clone, Copy)]
pub struct Spin {
    pub rate: f32,
}

impl Updatable for Spin {
    fn update(&mut self, t: f32, local: &mut LocalTransform) {
        local.set_yaw(t * self.rate);
    }
}

/// Everything needed to build one orbiting body.
#[derive(Debug, Default)]
pub struct BodyDesc {
    /// Label used for picking and speed overrides.
    pub name: String,
    /// Radial offset from the holder's origin.
    pub distance: f32,
    /// Uniform scale of the body's unit sphere.
    pub size: f32,
    /// Speed used when the table has no entry for `name`.
    pub base_speed: f32,
    pub texture: Option<String>,
    /// Nodes that travel with the body (rings). Their translation is
    /// replaced by the body's offset; rotation and scale are kept.
    pub decorations: Vec<SceneNode>,
}

/// Build the holder -> body hierarchy for one orbiting body.
pub fn build_orbiting_body(desc: BodyDesc, speeds: &SpeedTable) -> SceneNode {
    let offset = Vec3::new(desc.distance, 0.0, 0.0);

    let rim = SceneNode::new()
        .with_local(LocalTransform::new().with_uniform_scale(RIM_SHELL_SCALE))
        .with_renderable(Renderable::RimShell {
            rim: Rgb::WHITE,
            facing: Rgb::new(0.0, 0.0, 0.0),
        });

    let body = SceneNode::new()
        .with_name(desc.name.as_str())
        .with_local(
            LocalTransform::new()
                .with_translation(offset)
                .with_uniform_scale(desc.size),
        )
        .with_renderable(Renderable::Sphere {
            texture: desc.texture,
            emissive: false,
        })
        .with_child(rim);

    let decorations = desc.decorations.into_iter().map(|mut node| {
        node.local.translation = offset;
        node
    });

    SceneNode::new()
        .with_behavior(OrbitBehavior::new(desc.name, desc.base_speed, speeds.clone()))
        .with_child(body)
        .with_children(decorations)
}
