//! wgpu render backend for the orrery demo.
//!
//! Renders the built-in demo shapes (two cubes, a pyramid, a line) and the
//! scene's loaded game objects.
//!
//! # Invariants
//! - The renderer never mutates the scene.
//! - One uniform buffer serves every draw. Each draw's constants are
//!   written and submitted before the next draw's write, so the buffer
//!   never holds another draw's state when the GPU reads it.

mod gpu;
mod meshes;
mod shaders;
mod uniforms;

pub use gpu::WgpuRenderer;
pub use uniforms::FrameUniforms;
