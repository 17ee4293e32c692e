//! Shared frame-timing types.
//!
//! # Invariants
//! - Elapsed time is monotonically non-decreasing.
//! - Frame timing is an explicit value passed into update/draw, never
//!   hidden function-local state.

pub mod frame;

pub use frame::{FrameClock, FrameContext};

pub fn crate_info() -> &'static str {
    concat!("orrery-common v", env!("CARGO_PKG_VERSION"))
}
