// extensions/mod.rs
//
// Math-only building blocks used by the scene and camera systems.
// Nothing in here knows about SceneNode or the frame driver.

pub mod easing;
pub mod orbit_controls;
pub mod transform;
pub mod tween;

pub use easing::{Easing, lerp, lerp_vec3, ease, ease_vec3};
pub use orbit_controls::{OrbitControls, ControlsConfig};
pub use transform::{LocalTransform, compose_world, world_origin};
pub use tween::Tween;
