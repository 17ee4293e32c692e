//! Renderer-agnostic frame planning.
//!
//! # Invariants
//! - The draw order is fixed: built-in shapes first (cubes, pyramid,
//!   line), then game objects in load order.
//! - Renderers never mutate the scene.
//! - Per-draw constants flow through a single shared slot; each draw's
//!   state is written immediately before that draw consumes it.

mod plan;
mod renderer;
mod slot;

pub use plan::{frame_plan, DrawCommand, Drawable};
pub use renderer::{DebugTextRenderer, Renderer};
pub use slot::ConstantSlot;

pub fn crate_info() -> &'static str {
    "orrery-render v0.1.0"
}
