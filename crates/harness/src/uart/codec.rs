//! Bit-banging UART line codec.
//!
//! Assembles and disassembles full character frames — start bit, 5–8 data
//! bits LSB-first, optional parity, 1–2 stop bits — on the far side of the
//! design's serial pins. The receive path checks every frame bit and fails
//! the scenario on the first mismatch; the transmit path can deliberately
//! corrupt parity or stop bits to provoke the design's error reporting.

use tracing::trace;

use crate::common::error::{TbError, TbResult};
use crate::sim::{Scheduler, Signal};
use crate::uart::frame::SerialFrame;
use crate::uart::timing::BitTiming;

/// Direction of one character exchange, as seen from the design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The design transmitted; the harness sampled its `tx` pin.
    Transmit,
    /// The design received; the harness drove its `rx` pin.
    Receive,
}

/// Deliberate frame corruption for error-path scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaultInjection {
    /// Invert the transmitted parity bit.
    pub flip_parity: bool,
    /// Drive the stop bit(s) low instead of high.
    pub flip_stop: bool,
}

/// One character exchange. Built per character, logged, then discarded —
/// no state persists beyond the wire.
#[derive(Debug, Clone, Copy)]
pub struct UartTransaction {
    /// Who drove the character.
    pub dir: Direction,
    /// The character, masked to the configured word length.
    pub data: u8,
    /// Faults injected on transmit (always clean on receive).
    pub faults: FaultInjection,
}

/// Bit-level serial transceiver for one UART's pin pair.
#[derive(Debug, Clone)]
pub struct UartLine {
    timing: BitTiming,
    /// Design-driven line, sampled by [`read`](Self::read).
    tx: Signal,
    /// Design-facing line, driven by [`write`](Self::write).
    rx: Signal,
    frame: SerialFrame,
}

impl UartLine {
    /// Creates a transceiver over the design's `tx` (sampled) and `rx`
    /// (driven) pins with the given line configuration.
    pub fn new(scheduler: &Scheduler, frame: SerialFrame, tx: Signal, rx: Signal) -> Self {
        Self {
            timing: BitTiming::new(scheduler, frame.baud_rate),
            tx,
            rx,
            frame,
        }
    }

    /// The line configuration in use.
    pub fn frame(&self) -> &SerialFrame {
        &self.frame
    }

    /// Receives one character from the design.
    ///
    /// Waits for the start edge, center-aligns, then samples every frame
    /// bit one period apart. A start or stop bit at the wrong level is a
    /// [`TbError::FramingViolation`]; a parity mismatch against the
    /// configured generator is a [`TbError::ParityViolation`].
    pub async fn read(&self) -> TbResult<u8> {
        let t = &self.timing;

        // Align to the center of the start bit and verify it.
        t.wait_bit_center(&self.tx).await;
        let start = (self.tx.get() & 1) as u8;
        if start != 0 {
            return Err(TbError::FramingViolation {
                bit: "start",
                expected: 0,
                observed: start,
            });
        }

        // Data bits, LSB first.
        let mut data: u8 = 0;
        for i in 0..self.frame.word_len.length() {
            data |= t.sample_bit(&self.tx).await << i;
        }

        // Parity, when the frame carries one.
        if let Some(expected) = self.frame.parity.generate(data) {
            let observed = t.sample_bit(&self.tx).await;
            if observed != expected {
                return Err(TbError::ParityViolation { expected, observed });
            }
        }

        // Stop bit(s) must read high.
        for _ in 0..self.frame.stop.count() {
            let stop = t.sample_bit(&self.tx).await;
            if stop != 1 {
                return Err(TbError::FramingViolation {
                    bit: "stop",
                    expected: 1,
                    observed: stop,
                });
            }
        }

        let txn = UartTransaction {
            dir: Direction::Transmit,
            data,
            faults: FaultInjection::default(),
        };
        trace!(?txn, "uart rx");
        Ok(data)
    }

    /// Receives `num` characters back to back.
    pub async fn read_str(&self, num: usize) -> TbResult<String> {
        let mut s = String::with_capacity(num);
        for _ in 0..num {
            s.push(char::from(self.read().await?));
        }
        Ok(s)
    }

    /// Transmits one clean character to the design.
    pub async fn write(&self, data: u8) {
        self.write_with(data, FaultInjection::default()).await;
    }

    /// Transmits one character, optionally corrupting parity or stop bits.
    ///
    /// The byte is masked to the configured word length first; parity is
    /// generated over the masked value, matching what goes on the wire.
    pub async fn write_with(&self, data: u8, faults: FaultInjection) {
        let data = self.frame.word_len.cast(data);
        let txn = UartTransaction {
            dir: Direction::Receive,
            data,
            faults,
        };
        trace!(?txn, "uart tx");

        let t = &self.timing;

        // Start bit.
        t.drive_bit(&self.rx, 0).await;

        // Data bits, LSB first.
        for i in 0..self.frame.word_len.length() {
            t.drive_bit(&self.rx, (data >> i) & 1).await;
        }

        // Parity, optionally inverted to provoke a parity error.
        if let Some(parity) = self.frame.parity.generate(data) {
            t.drive_bit(&self.rx, parity ^ u8::from(faults.flip_parity))
                .await;
        }

        // Stop bit(s): high, or held low to provoke a framing error.
        let stop = u8::from(!faults.flip_stop);
        for _ in 0..self.frame.stop.count() {
            t.drive_bit(&self.rx, stop).await;
        }
    }

    /// Transmits a string one character at a time, strictly sequential.
    pub async fn write_str(&self, s: &str) {
        for b in s.bytes() {
            self.write(b).await;
        }
    }
}
