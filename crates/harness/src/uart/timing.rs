//! Bit-timing engine.
//!
//! Produces and consumes one serial bit at a precise time offset. The bit
//! period is derived from the baud rate once at construction and applied
//! fresh for every wait, so long frames never accumulate rounding error.
//! Mutating the driven line is the engine's only observable side effect.

use crate::sim::{Scheduler, SimDuration, Signal};

/// Bit-cadence primitive shared by the transmit and receive paths.
#[derive(Debug, Clone)]
pub struct BitTiming {
    sim: Scheduler,
    period: SimDuration,
}

impl BitTiming {
    /// Fixes the bit period for `baud_rate`.
    pub fn new(scheduler: &Scheduler, baud_rate: u32) -> Self {
        Self {
            sim: scheduler.clone(),
            period: SimDuration::from_baud(baud_rate),
        }
    }

    /// One bit period on the wire.
    pub fn period(&self) -> SimDuration {
        self.period
    }

    /// Suspends until half a bit period after the next falling edge of
    /// `line` — the center of a start bit. Subsequent [`sample_bit`]
    /// calls then land in the center of each following bit cell.
    ///
    /// [`sample_bit`]: Self::sample_bit
    pub async fn wait_bit_center(&self, line: &Signal) {
        line.falling_edge().await;
        self.sim.delay(self.period.half()).await;
    }

    /// Suspends one full bit period, then samples `line`.
    pub async fn sample_bit(&self, line: &Signal) -> u8 {
        self.sim.delay(self.period).await;
        (line.get() & 1) as u8
    }

    /// Drives `line` to `value` and holds it for one bit period.
    pub async fn drive_bit(&self, line: &Signal, value: u8) {
        line.set(u32::from(value & 1));
        self.sim.delay(self.period).await;
    }
}
