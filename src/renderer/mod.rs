//! WebGPU rendering module
//!
//! `build_scene` turns the game state into flat-coloured triangles in field
//! coordinates; `RenderState` letterboxes them onto the surface.

pub mod color;
pub mod font;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;
pub mod viewport;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
pub use viewport::Viewport;
