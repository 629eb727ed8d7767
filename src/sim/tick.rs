//! Fixed timestep simulation tick
//!
//! `tick` advances the state by one step. `FrameClock` turns variable frame
//! times into a bounded number of fixed `SIM_DT` ticks.

use super::pool::StepReport;
use super::state::SimState;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Advance the simulation by `dt` seconds
pub fn tick(state: &mut SimState, dt: f32) -> StepReport {
    let report = state.pool.update(dt, &state.arena, state.cull_policy);
    state.time_ticks += 1;

    if report.culled > 0 {
        log::debug!(
            "Tick {}: culled {} bodies, {} left",
            state.time_ticks,
            report.culled,
            state.pool.len()
        );
    }
    report
}

/// Fixed timestep accumulator
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run as many fixed ticks as `frame_dt` pays for
    ///
    /// Long frames are clamped and at most `MAX_SUBSTEPS` ticks run per call.
    /// A partial tick carries over to the next frame; anything still owed once
    /// the substep cap is hit is dropped, so the backlog never exceeds one
    /// tick. Reports from every tick are summed.
    pub fn advance(&mut self, state: &mut SimState, frame_dt: f32) -> StepReport {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut total = StepReport::default();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let report = tick(state, SIM_DT);
            total.integrated += report.integrated;
            total.culled += report.culled;
            total.contacts += report.contacts;

            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if self.accumulator >= SIM_DT {
            log::debug!(
                "Frame clock behind by {:.3}s after {} substeps, dropping backlog",
                self.accumulator,
                substeps
            );
            self.accumulator = 0.0;
        }
        total
    }

    /// Time waiting to be simulated
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Drop any pending time (after a pause, for instance)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
