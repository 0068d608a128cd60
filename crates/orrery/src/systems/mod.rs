pub mod camera_mode;
pub mod compose;
pub mod debris;
pub mod geometry;
pub mod orbit;
pub mod picking;
pub mod render;
pub mod rng;
pub mod update;
