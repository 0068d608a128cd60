use crate::components::renderable::Renderable;
use crate::core::scene::Scene;
use crate::renderer::instance::DrawInstance;

/// Every renderable in the scene, in draw-list order.
/// The index of each entry is the `slot` its draw instances carry.
pub fn static_geometry(scene: &Scene) -> Vec<&Renderable> {
    let mut out = Vec::new();
    scene.walk(|node, _| {
        if let Some(renderable) = &node.renderable {
            out.push(renderable);
        }
    });
    out
}

/// [`static_geometry`] as JSON, for handing to the renderer once after composition.
pub fn static_geometry_json(scene: &Scene) -> Result<String, serde_json::Error> {
    serde_json::to_string(&static_geometry(scene))
}

/// Rebuild the draw list from current world transforms.
/// Order and slots match [`static_geometry`], so the list only changes in its matrices.
pub fn build_draw_list(scene: &Scene, out: &mut Vec<DrawInstance>) {
    out.clear();
    scene.walk(|node, world| {
        if let Some(renderable) = &node.renderable {
            let slot = out.len() as u32;
            out.push(DrawInstance::new(world, renderable.kind(), slot, renderable.opacity()));
        }
    });
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use super::*;
    use crate::components::node::SceneNode;
    use crate::components::renderable::{RenderKind, Rgb};
    use crate::systems::orbit::{build_orbiting_body, BodyDesc, SpeedTable};
    use crate::systems::update::propagate;

    fn scene() -> Scene {
        let speeds = SpeedTable::new();
        Scene::new(
            SceneNode::new()
                .with_child(SceneNode::new().with_renderable(Renderable::Sphere { texture: None, emissive: true }))
                .with_child(SceneNode::new()) // pure group, not drawn
                .with_child(build_orbiting_body(
                    BodyDesc { name: "Earth".into(), distance: 2.2, size: 0.13, base_speed: 2.0, ..BodyDesc::default() },
                    &speeds,
                ))
                .with_child(SceneNode::new().with_renderable(Renderable::LineLoop {
                    points: vec![Vec3::X, Vec3::Z],
                    color: Rgb::WHITE,
                    opacity: 0.2,
                })),
        )
    }

    #[test]
    fn draw_list_matches_static_geometry() {
        let scene = scene();
        let statics = static_geometry(&scene);
        let mut list = Vec::new();
        build_draw_list(&scene, &mut list);

        assert_eq!(list.len(), statics.len());
        let kinds: Vec<u32> = list.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RenderKind::Sphere as u32,
                RenderKind::Sphere as u32,
                RenderKind::RimShell as u32,
                RenderKind::LineLoop as u32,
            ]
        );
        for (i, d) in list.iter().enumerate() {
            assert_eq!(d.slot as usize, i);
            assert_eq!(d.kind, statics[i].kind() as u32);
        }
        assert_eq!(list[3].opacity, 0.2);
    }

    #[test]
    fn draw_list_tracks_motion() {
        let mut scene = scene();
        let mut list = Vec::new();
        propagate(scene.root_mut(), 0.0);
        build_draw_list(&scene, &mut list);
        let before = Mat4::from_cols_array_2d(&list[1].model);
        assert!(before.w_axis.truncate().abs_diff_eq(Vec3::new(2.2, 0.0, 0.0), 1e-5));

        propagate(scene.root_mut(), 0.5);
        build_draw_list(&scene, &mut list);
        let after = Mat4::from_cols_array_2d(&list[1].model);
        let expected = Vec3::new(2.2 * 1f32.cos(), 0.0, -2.2 * 1f32.sin());
        assert!(after.w_axis.truncate().abs_diff_eq(expected, 1e-5));
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn static_geometry_serializes_with_kind_tags() {
        let json = static_geometry_json(&scene()).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains(r#""kind":"sphere""#));
        assert!(json.contains(r#""kind":"rim_shell""#));
        assert!(json.contains(r#""kind":"line_loop""#));
    }
}
