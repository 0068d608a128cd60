pub mod node;
pub mod renderable;
