use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::assets::registry::MeshHandle;
use crate::systems::geometry::{HazeSprite, InstanceTransform, Star};

/// Linear RGB color, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// From hue/saturation/lightness. Hue wraps, so -0.02 equals 0.98.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(1.0);
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::new(l, l, l);
        }

        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self {
            r: hue_to_channel(p, q, h + 1.0 / 3.0),
            g: hue_to_channel(p, q, h),
            b: hue_to_channel(p, q, h - 1.0 / 3.0),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Numeric code for each renderable variant, as written into the draw list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum RenderKind {
    Sphere = 0,
    RimShell,
    Torus,
    LineLoop,
    LineStrip,
    Instanced,
    Points,
    Sprites,
}

/// What a node draws. Geometry is baked once at composition; only the
/// node's world matrix changes per frame.
///
/// Surfaces (spheres, tori, instances) are also what picking rays test
/// against; lines, points and sprites are decoration only.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Renderable {
    /// Unit sphere, scaled by the node.
    Sphere {
        texture: Option<String>,
        emissive: bool,
    },
    /// Fresnel rim shell around a unit sphere.
    RimShell { rim: Rgb, facing: Rgb },
    /// Torus lying in the local XY plane.
    Torus {
        major_radius: f32,
        minor_radius: f32,
        color: Rgb,
        opacity: f32,
    },
    /// Closed polyline; the renderer joins the last point to the first.
    LineLoop {
        points: Vec<Vec3>,
        color: Rgb,
        opacity: f32,
    },
    /// Open polyline with per-vertex colors.
    LineStrip {
        points: Vec<Vec3>,
        colors: Vec<Rgb>,
        width: f32,
    },
    /// One batched draw of a prototype mesh at many baked transforms.
    Instanced {
        mesh: MeshHandle,
        /// Bounding-sphere radius of the prototype in its own space.
        bounding_radius: f32,
        instances: Vec<InstanceTransform>,
    },
    Points { stars: Vec<Star>, size: f32 },
    Sprites { sprites: Vec<HazeSprite> },
}

impl Renderable {
    pub fn kind(&self) -> RenderKind {
        match self {
            Renderable::Sphere { .. } => RenderKind::Sphere,
            Renderable::RimShell { .. } => RenderKind::RimShell,
            Renderable::Torus { .. } => RenderKind::Torus,
            Renderable::LineLoop { .. } => RenderKind::LineLoop,
            Renderable::LineStrip { .. } => RenderKind::LineStrip,
            Renderable::Instanced { .. } => RenderKind::Instanced,
            Renderable::Points { .. } => RenderKind::Points,
            Renderable::Sprites { .. } => RenderKind::Sprites,
        }
    }

    /// Whole-draw opacity; per-element opacity lives in the baked geometry.
    pub fn opacity(&self) -> f32 {
        match self {
            Renderable::Torus { opacity, .. } | Renderable::LineLoop { opacity, .. } => *opacity,
            _ => 1.0,
        }
    }
}
