use serde::{Deserialize, Serialize};

use crate::components::renderable::Rgb;
use crate::core::time::DEFAULT_TIME_SCALE;
use crate::extensions::orbit_controls::ControlsConfig;
use crate::renderer::camera::CameraConfig;
use crate::systems::camera_mode::{FocusConfig, SweepConfig};
use crate::systems::geometry::{HazeLayer, StarFieldConfig};

/// Scene configuration. Every field has a default, so `{}` is a valid
/// config and partial JSON only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Scene time per host millisecond (default: 0.0002).
    pub time_scale: f32,
    pub camera: CameraConfig,
    pub sweep: SweepConfig,
    pub focus: FocusConfig,
    pub controls: ControlsConfig,
    pub sun: SunConfig,
    /// Orbiting bodies, innermost first.
    pub bodies: Vec<BodyConfig>,
    pub orbit_guides: OrbitGuideConfig,
    pub guides: GuideConfig,
    pub belt: BeltConfig,
    pub stars: StarFieldConfig,
    pub haze: Vec<HazeLayer>,
}

/// The central body. Unnamed, so it blocks picking rays without labeling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    pub radius: f32,
    pub texture: Option<String>,
}

/// One orbiting body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    pub size: f32,
    pub distance: f32,
    /// Base angular speed, used until the speed table overrides it.
    pub speed: f32,
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub ring: Option<RingConfig>,
}

/// A torus riding with its body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    pub major_radius: f32,
    pub minor_radius: f32,
    #[serde(default = "default_ring_color")]
    pub color: Rgb,
    #[serde(default = "default_ring_opacity")]
    pub opacity: f32,
    /// Scale along the torus axis (local z); flattens the tube.
    #[serde(default = "default_ring_flatten")]
    pub flatten: f32,
    /// Rotation about local X, radians. π/2 lays the ring in the orbital plane.
    #[serde(default)]
    pub tilt: f32,
}

fn default_ring_color() -> Rgb {
    Rgb::WHITE
}

fn default_ring_opacity() -> f32 {
    1.0
}

fn default_ring_flatten() -> f32 {
    1.0
}

/// Faint circles tracing each body's orbit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitGuideConfig {
    pub segments: usize,
    pub opacity: f32,
}

/// Colored guide curves, one per body distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    pub segments: usize,
    /// Radial noise amplitude; 0 gives exact circles.
    pub jitter: f32,
}

/// The debris belt annulus and cluster parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeltConfig {
    pub min_radius: f32,
    pub max_radius: f32,
    pub size: f32,
    pub size_jitter: f32,
    pub spin_rate: f32,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            camera: CameraConfig::default(),
            sweep: SweepConfig::default(),
            focus: FocusConfig::default(),
            controls: ControlsConfig::default(),
            sun: SunConfig::default(),
            bodies: default_bodies(),
            orbit_guides: OrbitGuideConfig::default(),
            guides: GuideConfig::default(),
            belt: BeltConfig::default(),
            stars: StarFieldConfig::default(),
            haze: vec![
                HazeLayer { hue: 0.6, z: -40.0, ..HazeLayer::default() },
                HazeLayer { hue: 0.0, z: 40.0, ..HazeLayer::default() },
            ],
        }
    }
}

impl Default for SunConfig {
    fn default() -> Self {
        Self { radius: 1.0, texture: None }
    }
}

impl Default for OrbitGuideConfig {
    fn default() -> Self {
        Self { segments: 64, opacity: 0.2 }
    }
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self { segments: 128, jitter: 0.0 }
    }
}

impl Default for BeltConfig {
    fn default() -> Self {
        Self {
            min_radius: 5.1,
            max_radius: 5.6,
            size: 0.035,
            size_jitter: 0.05,
            spin_rate: 0.02,
        }
    }
}

fn body(name: &str, size: f32, distance: f32, speed: f32, ring: Option<RingConfig>) -> BodyConfig {
    BodyConfig {
        name: name.to_string(),
        size,
        distance,
        speed,
        texture: Some(format!("{}.png", name.to_lowercase())),
        ring,
    }
}

fn default_bodies() -> Vec<BodyConfig> {
    let saturn_ring = RingConfig {
        major_radius: 0.4,
        minor_radius: 0.1,
        color: Rgb::WHITE,
        opacity: 1.0,
        flatten: 0.1,
        tilt: std::f32::consts::FRAC_PI_2,
    };
    let uranus_ring = RingConfig {
        major_radius: 0.25,
        minor_radius: 0.04,
        color: Rgb::from_hex(0xccccff),
        opacity: 0.3,
        flatten: 0.05,
        tilt: 0.0,
    };
    vec![
        body("Mercury", 0.07, 1.2, 3.0, None),
        body("Venus", 0.12, 1.7, 4.0, None),
        body("Earth", 0.13, 2.2, 2.0, None),
        body("Mars", 0.1, 2.6, 2.5, None),
        body("Jupiter", 0.25, 3.1, 4.5, None),
        body("Saturn", 0.22, 3.6, 3.0, Some(saturn_ring)),
        body("Uranus", 0.18, 4.1, 2.5, Some(uranus_ring)),
        body("Neptune", 0.18, 4.6, 2.0, None),
    ]
}

impl OrreryConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
