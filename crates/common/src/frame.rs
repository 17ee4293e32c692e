use serde::{Deserialize, Serialize};

/// Timing for a single tick: the delta since the previous tick and the
/// total elapsed time since the clock started.
///
/// Update and draw receive this as an explicit value. Nothing else in the
/// system keeps its own timing state, so replaying the same sequence of
/// contexts reproduces the same frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameContext {
    /// Seconds since the previous tick.
    pub delta: f32,
    /// Seconds since the clock was created.
    pub elapsed: f32,
}

/// Accumulates elapsed time across ticks.
///
/// Elapsed time never decreases; negative deltas are treated as zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FrameClock {
    elapsed: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta` seconds and return the context for this tick.
    pub fn tick(&mut self, delta: f32) -> FrameContext {
        let delta = delta.max(0.0);
        self.elapsed += delta;
        FrameContext {
            delta,
            elapsed: self.elapsed,
        }
    }

    /// Total elapsed seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_accumulates() {
        let mut clock = FrameClock::new();
        let a = clock.tick(0.016);
        let b = clock.tick(0.016);
        assert_eq!(a.delta, 0.016);
        assert!(b.elapsed > a.elapsed);
        assert_eq!(clock.elapsed(), b.elapsed);
    }

    #[test]
    fn elapsed_is_monotonic() {
        let mut clock = FrameClock::new();
        clock.tick(0.5);
        let before = clock.elapsed();
        clock.tick(-1.0);
        assert_eq!(clock.elapsed(), before);
    }

    #[test]
    fn fresh_clock_starts_at_zero() {
        let clock = FrameClock::new();
        assert_eq!(clock.elapsed(), 0.0);
    }
}
