//! Free-running clock generation.

use crate::sim::scheduler::{Scheduler, TaskHandle};
use crate::sim::signal::Signal;
use crate::sim::time::SimDuration;

/// A 50%-duty square-wave generator for a clock signal.
///
/// Mirrors the usual testbench ritual: build the clock, start it as a
/// background task, then drive everything else off its edges.
#[derive(Debug)]
pub struct Clock {
    signal: Signal,
    period: SimDuration,
}

impl Clock {
    /// Prepares a clock on `signal` with the given full period.
    pub fn new(signal: Signal, period: SimDuration) -> Self {
        Self { signal, period }
    }

    /// Starts toggling; the first rising edge lands after one delta cycle.
    ///
    /// The task runs until the scenario ends and is abandoned with it.
    pub fn start(self, scheduler: &Scheduler) -> TaskHandle<()> {
        let half = self.period.half();
        let signal = self.signal;
        let sim = scheduler.clone();
        scheduler.spawn(async move {
            loop {
                signal.set(1);
                sim.delay(half).await;
                signal.set(0);
                sim.delay(half).await;
            }
        })
    }
}
