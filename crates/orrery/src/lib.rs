pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{OrreryConfig, BodyConfig, RingConfig, SunConfig, BeltConfig, GuideConfig, OrbitGuideConfig};
pub use api::driver::FrameDriver;
pub use assets::manifest::{AssetManifest, PrototypeDescriptor};
pub use assets::registry::{AssetError, AssetLoadTracker, LoadStatus, MeshHandle, Prototype};
pub use components::node::{SceneNode, Updatable};
pub use components::renderable::{Renderable, RenderKind, Rgb};
pub use core::scene::Scene;
pub use core::time::{FrameTime, SceneClock};
pub use input::queue::{InputEvent, InputQueue, PointerState};
pub use renderer::camera::{CameraConfig, CameraUniform, PerspectiveCamera};
pub use renderer::instance::{DrawBuffer, DrawInstance};
pub use renderer::traits::{FrameView, RenderSink};
pub use systems::camera_mode::{CameraMode, CameraRig, CameraTransition, FocusConfig, SweepConfig};
pub use systems::compose::{compose_scene, compose_when_ready, ComposeError};
pub use systems::debris::{build_debris_field, DebrisParams};
pub use systems::geometry::{
    generate_guide_curve, generate_haze_sprites, generate_ring_curve, generate_scatter_field,
    generate_star_field, guide_curve_color, GuideCurve, HazeLayer, InstanceTransform, StarFieldConfig,
};
pub use systems::orbit::{build_orbiting_body, BodyDesc, OrbitBehavior, Spin, SpeedTable};
pub use systems::picking::{pick, HoverState, Pick, Ray};
pub use systems::render::{build_draw_list, static_geometry, static_geometry_json};
pub use systems::rng::scatter_count;
pub use systems::update::propagate;

// Extensions: math-only building blocks
pub use extensions::{
    Easing, lerp, lerp_vec3, ease, ease_vec3,
    OrbitControls, ControlsConfig,
    LocalTransform, compose_world, world_origin,
    Tween,
};
