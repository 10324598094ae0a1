//! WebGPU rendering module
//!
//! Scenes are flat-coloured triangle lists built on the CPU from simulation
//! state, then drawn by a single alpha-blended pipeline per canvas.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, SurfaceFormats};
pub use scene::{pong_scene, snake_scene, starfield_scene};
pub use shapes::{ShapeBatch, Viewport};
pub use vertex::Vertex;
