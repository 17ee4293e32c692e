//! Camera actions: keyboard polling mapped to a shared action vocabulary.
//!
//! # Invariants
//! - The scene consumes actions, never raw key events.
//! - Movement and pan steps are fixed per-poll constants, not scaled by
//!   frame delta time. Object animation IS time-scaled; the mismatch is
//!   inherited behavior and kept.

pub mod action;

pub use action::{CameraAction, MOVE_STEP, PAN_STEP};

pub fn crate_info() -> &'static str {
    concat!("orrery-input v", env!("CARGO_PKG_VERSION"))
}
