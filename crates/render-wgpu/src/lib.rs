//! wgpu render backend for terrawalk.
//!
//! Draws the terrain surface with hemisphere + sun lighting and an optional
//! translucent water plane. The look camera turns mouse motion into the view
//! direction the character controller walks along.
//!
//! # Invariants
//! - Renderer never mutates player or terrain state.
//! - Terrain buffers are uploaded once; only the uniforms change per frame.

mod camera;
mod gpu;
mod shaders;

pub use camera::LookCamera;
pub use gpu::{WaterPlane, WgpuRenderer};
