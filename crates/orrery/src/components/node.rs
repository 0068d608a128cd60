use std::fmt;

use glam::Vec3;

use crate::components::renderable::Renderable;
use crate::extensions::transform::LocalTransform;

/// Per-frame behavior attached to a node.
///
/// Implementations may only read the time and their own parameters
/// (plus any shared context they were constructed with); they must not
/// look at the camera or pointer.
pub trait Updatable: fmt::Debug {
    fn update(&mut self, t: f32, local: &mut LocalTransform);
}

/// A node in the scene tree. Children are owned exclusively, so a node
/// belongs to exactly one parent and the tree cannot contain cycles.
#[derive(Debug, Default)]
pub struct SceneNode {
    /// Name tag for picking and labels. Empty means unnamed.
    pub name: String,
    pub local: LocalTransform,
    /// What this node draws (and what picking rays can hit), if anything.
    pub renderable: Option<Renderable>,
    /// Per-frame behavior, if any.
    pub behavior: Option<Box<dyn Updatable>>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// An empty group at the parent's origin.
    pub fn new() -> Self {
        Self::default()
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_local(mut self, local: LocalTransform) -> Self {
        self.local = local;
        self
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.local.translation = translation;
        self
    }

    pub fn with_renderable(mut self, renderable: Renderable) -> Self {
        self.renderable = Some(renderable);
        self
    }

    pub fn with_behavior(mut self, behavior: impl Updatable + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SceneNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append a child; siblings keep insertion order.
    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// Depth-first search for the first node with the given name.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.is_named() && self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Depth-first search for the first node with the given name (mutable).
    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        if self.is_named() && self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(name))
    }

    /// Number of nodes in this subtree, including self.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(SceneNode::subtree_len).sum::<usize>()
    }
}
