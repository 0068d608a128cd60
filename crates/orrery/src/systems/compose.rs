//! One-shot scene assembly: sun, bodies with their orbit guides, the
//! debris belt, guide curves, star field and haze, all under one root.

use std::collections::HashSet;

use glam::{Quat, Vec3};
use log::info;
use rand::Rng;
use thiserror::Error;

use crate::api::config::{BodyConfig, OrreryConfig, RingConfig};
use crate::assets::registry::{AssetError, AssetLoadTracker, Prototype};
use crate::components::node::SceneNode;
use crate::components::renderable::{Renderable, Rgb};
use crate::core::scene::Scene;
use crate::extensions::transform::LocalTransform;
use crate::systems::debris::{build_debris_field, DebrisParams};
use crate::systems::geometry::{
    generate_guide_curve, generate_haze_sprites, generate_ring_curve, generate_star_field, guide_curve_color,
};
use crate::systems::orbit::{build_orbiting_body, BodyDesc, SpeedTable};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComposeError {
    #[error("no debris prototypes to compose with")]
    NoPrototypes,

    #[error("belt range [{min}, {max}] is not a valid annulus")]
    InvalidBelt { min: f32, max: f32 },

    #[error("body '{name}': {reason}")]
    InvalidBody { name: String, reason: &'static str },

    #[error("body '{0}' is listed more than once")]
    DuplicateBody(String),

    #[error(transparent)]
    Asset(#[from] AssetError),
}

fn validate(config: &OrreryConfig) -> Result<(), ComposeError> {
    let belt = &config.belt;
    let belt_ok = belt.min_radius.is_finite()
        && belt.max_radius.is_finite()
        && belt.min_radius >= 0.0
        && belt.max_radius > belt.min_radius;
    if !belt_ok {
        return Err(ComposeError::InvalidBelt { min: belt.min_radius, max: belt.max_radius });
    }

    let mut seen = HashSet::new();
    for body in &config.bodies {
        let invalid = |reason| ComposeError::InvalidBody { name: body.name.clone(), reason };
        if body.name.is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if !(body.distance.is_finite() && body.distance >= 0.0) {
            return Err(invalid("distance must be finite and non-negative"));
        }
        if !(body.size.is_finite() && body.size > 0.0) {
            return Err(invalid("size must be finite and positive"));
        }
        if !seen.insert(body.name.as_str()) {
            return Err(ComposeError::DuplicateBody(body.name.clone()));
        }
    }
    Ok(())
}

fn ring_node(ring: &RingConfig) -> SceneNode {
    SceneNode::new()
        .with_local(
            LocalTransform::new()
                .with_rotation(Quat::from_rotation_x(ring.tilt))
                .with_scale(Vec3::new(1.0, 1.0, ring.flatten)),
        )
        .with_renderable(Renderable::Torus {
            major_radius: ring.major_radius,
            minor_radius: ring.minor_radius,
            color: ring.color,
            opacity: ring.opacity,
        })
}

fn body_desc(body: &BodyConfig) -> BodyDesc {
    BodyDesc {
        name: body.name.clone(),
        distance: body.distance,
        size: body.size,
        base_speed: body.speed,
        texture: body.texture.clone(),
        decorations: body.ring.iter().map(ring_node).collect(),
    }
}

/// Build the whole scene. Runs once, after every prototype has loaded.
pub fn compose_scene<R: Rng + ?Sized>(
    config: &OrreryConfig,
    prototypes: &[Prototype],
    speeds: &SpeedTable,
    rng: &mut R,
) -> Result<Scene, ComposeError> {
    if prototypes.is_empty() {
        return Err(ComposeError::NoPrototypes);
    }
    validate(config)?;

    let mut root = SceneNode::new();

    root.add_child(
        SceneNode::new()
            .with_local(LocalTransform::new().with_uniform_scale(config.sun.radius))
            .with_renderable(Renderable::Sphere {
                texture: config.sun.texture.clone(),
                emissive: true,
            }),
    );

    for body in &config.bodies {
        root.add_child(build_orbiting_body(body_desc(body), speeds));
        root.add_child(SceneNode::new().with_renderable(Renderable::LineLoop {
            points: generate_ring_curve(body.distance, config.orbit_guides.segments),
            color: Rgb::WHITE,
            opacity: config.orbit_guides.opacity,
        }));
    }

    let belt = &config.belt;
    root.add_child(build_debris_field(
        prototypes,
        &DebrisParams {
            min_radius: belt.min_radius,
            max_radius: belt.max_radius,
            size_base: belt.size,
            size_jitter: belt.size_jitter,
            spin_rate: belt.spin_rate,
        },
        rng,
    ));

    let count = config.bodies.len();
    let mut guides = SceneNode::new();
    for (i, body) in config.bodies.iter().enumerate() {
        let color = guide_curve_color(i, count);
        let curve = generate_guide_curve(body.distance, config.guides.jitter, config.guides.segments, |_| color, rng);
        guides.add_child(SceneNode::new().with_renderable(Renderable::LineStrip {
            points: curve.points,
            colors: curve.colors,
            width: curve.width,
        }));
    }
    root.add_child(guides);

    root.add_child(SceneNode::new().with_renderable(Renderable::Points {
        stars: generate_star_field(&config.stars, rng),
        size: config.stars.size,
    }));

    for layer in &config.haze {
        root.add_child(SceneNode::new().with_renderable(Renderable::Sprites {
            sprites: generate_haze_sprites(layer, rng),
        }));
    }

    let scene = Scene::new(root);
    info!(
        "composed scene: {} nodes, {} bodies, {} debris clusters",
        scene.len(),
        count,
        prototypes.len()
    );
    Ok(scene)
}

/// Compose as soon as the tracker releases its prototypes.
/// `Ok(None)` while loads are still pending or after the one release.
pub fn compose_when_ready<R: Rng + ?Sized>(
    config: &OrreryConfig,
    tracker: &mut AssetLoadTracker,
    speeds: &SpeedTable,
    rng: &mut R,
) -> Result<Option<Scene>, ComposeError> {
    match tracker.take_ready()? {
        Some(prototypes) => compose_scene(config, &prototypes, speeds, rng).map(Some),
        None => Ok(None),
    }
}
