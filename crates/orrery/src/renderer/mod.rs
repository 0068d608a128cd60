pub mod camera;
pub mod instance;
pub mod traits;

pub use camera::{CameraConfig, CameraUniform, PerspectiveCamera};
pub use instance::{DrawBuffer, DrawInstance};
pub use traits::{FrameView, RenderSink};
