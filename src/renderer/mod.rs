//! Rendering module
//!
//! Frames are composed on the CPU into a [`Canvas`] by the [`Scene`], then
//! presented through wgpu as one textured quad.

pub mod canvas;
pub mod pipeline;
pub mod scene;
pub mod vertex;

pub use canvas::Canvas;
pub use pipeline::FramePipeline;
pub use scene::{Scene, SceneError};
