//! The debris belt: one spinning instanced cluster per prototype mesh,
//! each confined to its own slice of the belt annulus.

use rand::Rng;

use crate::assets::registry::Prototype;
use crate::components::node::SceneNode;
use crate::components::renderable::Renderable;
use crate::systems::geometry::generate_scatter_field;
use crate::systems::orbit::Spin;
use crate::systems::rng::scatter_count;

/// Sub-band `[lo, hi]` of the annulus `[min, max]` claimed by prototype `index` of `count`.
pub fn sub_band(min_radius: f32, max_radius: f32, index: usize, count: usize) -> (f32, f32) {
    let width = max_radius - min_radius;
    let n = count.max(1) as f32;
    (
        min_radius + index as f32 / n * width,
        min_radius + (index + 1) as f32 / n * width,
    )
}

/// Parameters shared by every cluster in the belt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebrisParams {
    pub min_radius: f32,
    pub max_radius: f32,
    pub size_base: f32,
    pub size_jitter: f32,
    pub spin_rate: f32,
}

/// Group node holding one cluster per prototype, in prototype order.
/// Clusters are unnamed: they can block picking rays but never label.
pub fn build_debris_field<R: Rng + ?Sized>(
    prototypes: &[Prototype],
    params: &DebrisParams,
    rng: &mut R,
) -> SceneNode {
    let clusters = prototypes.iter().enumerate().map(|(i, proto)| {
        let (lo, hi) = sub_band(params.min_radius, params.max_radius, i, prototypes.len());
        let count = scatter_count(rng);
        let instances = generate_scatter_field(
            count,
            lo,
            hi,
            params.size_base * proto.scale,
            params.size_jitter * proto.scale,
            rng,
        );
        SceneNode::new()
            .with_renderable(Renderable::Instanced {
                mesh: proto.mesh,
                bounding_radius: proto.bounding_radius,
                instances,
            })
            .with_behavior(Spin { rate: params.spin_rate })
    });
    SceneNode::new().with_children(clusters)
}
