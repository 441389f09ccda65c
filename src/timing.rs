//! Fixed-step clock
//!
//! Converts wall-clock time between redraws into a whole number of simulation
//! ticks, so game speed does not depend on how long a frame takes to draw.

use std::time::Duration;

use crate::consts::{MAX_SUBSTEPS, TICK_INTERVAL};

/// Accumulates elapsed time and hands it out in fixed steps
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    max_substeps: u32,
    accumulator: Duration,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(TICK_INTERVAL, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: Duration, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: Duration::ZERO,
        }
    }

    /// Add `elapsed` and return how many ticks are due.
    ///
    /// At most `max_substeps` ticks are returned; time beyond that is dropped
    /// so a long stall (window drag, debugger) does not replay as a burst.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if ticks == self.max_substeps && self.accumulator >= self.step {
            log::debug!(
                "Dropping {:?} of simulation time after {} substeps",
                self.accumulator,
                ticks
            );
            self.accumulator = Duration::ZERO;
        }

        ticks
    }

    /// Time left until the next tick is due
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }

    /// Forget any partial tick (used when a new screen starts)
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }

    pub fn step(&self) -> Duration {
        self.step
    }
}
