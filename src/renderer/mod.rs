//! WebGPU rendering module
//!
//! A single alpha-blended triangle-list pipeline; the scene is rebuilt as a
//! vertex list every frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene;
pub use vertex::Vertex;
