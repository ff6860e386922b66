//! WebGPU rendering module
//!
//! Draws placeholder geometry for each scene group as coloured triangles
//! under a single view-projection uniform.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{SceneMesh, scene_mesh};
pub use vertex::Vertex;
