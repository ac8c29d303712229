//! Fixed-timestep accumulator
//!
//! Wall-clock frame deltas go in, whole `SIM_DT` steps come out. Spiky
//! deltas are clamped and catch-up is capped per frame so a backgrounded
//! host cannot trigger a stall cascade when it resumes.

use super::world::{StepReport, World};
use crate::consts::{MAX_FRAME_DELTA, MAX_SUBSTEPS, SIM_DT};

/// Carries fractional frame time between calls
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's elapsed seconds, stepping the world as many
    /// whole fixed steps as fit (at most `MAX_SUBSTEPS`)
    ///
    /// Returns one report per executed step, oldest first. Leftover time
    /// stays in the accumulator for the next call.
    pub fn advance(&mut self, world: &mut World, elapsed: f32) -> Vec<StepReport> {
        let elapsed = if elapsed.is_finite() && elapsed > 0.0 {
            elapsed.min(MAX_FRAME_DELTA)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let mut reports = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            reports.push(world.step_frame(SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        reports
    }

    /// Unconsumed frame time in seconds
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Drop any banked time (call when unpausing)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
