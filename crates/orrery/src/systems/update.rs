use crate::components::node::SceneNode;

/// Run every behavior in the tree for time `t`.
///
/// Pre-order: a node's own behavior runs before any of its children,
/// and children run in insertion order. Each node is visited exactly once.
pub fn propagate(node: &mut SceneNode, t: f32) {
    if let Some(behavior) = node.behavior.as_mut() {
        behavior.update(t, &mut node.local);
    }
    for child in &mut node.children {
        propagate(child, t);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::components::node::Updatable;
    use crate::extensions::transform::LocalTransform;

    /// Appends its tag to a shared log on every update.
    #[derive(Debug)]
    struct Recorder {
        tag: &'static str,
        log: Rc<RefCell<Vec<(&'static str, f32)>>>,
    }

    impl Updatable for Recorder {
        fn update(&mut self, t: f32, _local: &mut LocalTransform) {
            self.log.borrow_mut().push((self.tag, t));
        }
    }

    fn recorded(tag: &'static str, log: &Rc<RefCell<Vec<(&'static str, f32)>>>) -> SceneNode {
        SceneNode::new().with_behavior(Recorder { tag, log: Rc::clone(log) })
    }

    #[test]
    fn every_behavior_runs_once_in_preorder() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut root = recorded("root", &log)
            .with_child(
                recorded("a", &log)
                    .with_child(recorded("a1", &log).with_child(recorded("a1x", &log)))
                    .with_child(SceneNode::new().with_child(recorded("a2-deep", &log))),
            )
            .with_child(recorded("b", &log));

        propagate(&mut root, 0.5);

        let log = log.borrow();
        let tags: Vec<&str> = log.iter().map(|(tag, _)| *tag).collect();
        assert_eq!(tags, vec!["root", "a", "a1", "a1x", "a2-deep", "b"]);
        assert!(log.iter().all(|(_, t)| *t == 0.5));
    }

    #[test]
    fn nodes_without_behavior_are_traversed() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut root = SceneNode::new().with_child(SceneNode::new().with_child(recorded("leaf", &log)));
        propagate(&mut root, 1.0);
        propagate(&mut root, 2.0);
        assert_eq!(*log.borrow(), vec![("leaf", 1.0), ("leaf", 2.0)]);
    }

    #[test]
    fn empty_tree_is_a_no_op() {
        let mut root = SceneNode::new();
        propagate(&mut root, 3.0);
        assert_eq!(root.local, LocalTransform::default());
    }
}
