//! Fixed timestep accumulator
//!
//! Converts variable render-frame deltas into a whole number of simulation
//! ticks.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame delta we honour (tab switches, breakpoints)
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame's elapsed time, returning how many ticks to run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Fraction of a tick left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / SIM_DT).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_frame_at_sim_rate() {
        let mut clock = FrameClock::new();
        for _ in 0..10 {
            assert_eq!(clock.advance(SIM_DT), 1);
        }
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(SIM_DT * 0.6), 0);
        assert!(clock.alpha() > 0.5);
        assert_eq!(clock.advance(SIM_DT * 0.6), 1);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut clock = FrameClock::new();
        let ticks = clock.advance(5.0);
        assert!(ticks <= MAX_SUBSTEPS);
        assert!(ticks as f32 * SIM_DT <= MAX_FRAME_DT + 1e-6);
    }

    #[test]
    fn test_bad_deltas_are_ignored() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.alpha(), 0.0);
    }
}
