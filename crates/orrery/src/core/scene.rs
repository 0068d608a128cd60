use glam::{Mat4, Vec3};

use crate::components::node::SceneNode;
use crate::extensions::transform::{compose_world, world_origin};

/// The composed scene: a single root node owning the whole tree.
/// Built once after assets load and kept for the process lifetime.
#[derive(Debug, Default)]
pub struct Scene {
    root: SceneNode,
}

impl Scene {
    pub fn new(root: SceneNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut SceneNode {
        &mut self.root
    }

    /// Find the first node with the given name.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.root.find(name)
    }

    /// Find the first node with the given name (mutable).
    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        self.root.find_mut(name)
    }

    /// Visit every node depth-first (pre-order, siblings in insertion order)
    /// together with its world matrix.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&'a SceneNode, &Mat4)) {
        fn recurse<'a>(node: &'a SceneNode, parent: &Mat4, visit: &mut impl FnMut(&'a SceneNode, &Mat4)) {
            let world = compose_world(parent, &node.local);
            visit(node, &world);
            for child in &node.children {
                recurse(child, &world, visit);
            }
        }
        recurse(&self.root, &Mat4::IDENTITY, &mut visit);
    }

    /// World matrix of the first node with the given name.
    pub fn world_matrix(&self, name: &str) -> Option<Mat4> {
        let mut found = None;
        self.walk(|node, world| {
            if found.is_none() && node.is_named() && node.name == name {
                found = Some(*world);
            }
        });
        found
    }

    /// World-space position of the first node with the given name.
    pub fn world_position(&self, name: &str) -> Option<Vec3> {
        self.world_matrix(name).map(|m| world_origin(&m))
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.root.subtree_len()
    }

    /// Whether the scene is just an empty root.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty() && self.root.renderable.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_position_accumulates_ancestors() {
        let scene = Scene::new(
            SceneNode::new()
                .with_translation(Vec3::new(1.0, 0.0, 0.0))
                .with_child(
                    SceneNode::new()
                        .with_translation(Vec3::new(0.0, 2.0, 0.0))
                        .with_child(SceneNode::new().with_name("moon").with_translation(Vec3::Z)),
                ),
        );
        let pos = scene.world_position("moon").unwrap();
        assert!(pos.abs_diff_eq(Vec3::new(1.0, 2.0, 1.0), 1e-6));
        assert!(scene.world_position("nothing").is_none());
    }

    #[test]
    fn walk_is_preorder_in_insertion_order() {
        let scene = Scene::new(
            SceneNode::new()
                .with_name("root")
                .with_child(SceneNode::new().with_name("a").with_child(SceneNode::new().with_name("a1")))
                .with_child(SceneNode::new().with_name("b")),
        );
        let mut order = Vec::new();
        scene.walk(|node, _| order.push(node.name.clone()));
        assert_eq!(order, vec!["root", "a", "a1", "b"]);
        assert_eq!(scene.len(), 4);
    }

    #[test]
    fn default_scene_is_empty() {
        let scene = Scene::default();
        assert!(scene.is_empty());
        assert_eq!(scene.len(), 1);
    }
}
