//! APB register-access bus.
//!
//! This module implements the master side of the two-phase APB protocol the
//! SoC's peripherals hang off, plus the contract a slave-side register model
//! satisfies:
//! 1. **Master:** [`ApbMaster`] performs blocking SETUP→ACCESS round trips
//!    with byte-strobe write masking and slave-error checking.
//! 2. **Pins:** [`ApbBus`] bundles the wire-level signals of one bus port.
//! 3. **Slave models:** [`RegisterBlock`] is implemented by reference models
//!    and test doubles that answer register reads and writes.

pub mod master;

pub use master::{ApbBus, ApbMaster};

/// Answer to a register read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusResponse {
    /// Read data driven onto `prdata`.
    pub rdata: u32,
    /// Whether the slave flags the access as erroneous (`pslverr`).
    pub slverr: bool,
}

impl BusResponse {
    /// A successful read returning `rdata`.
    pub fn ok(rdata: u32) -> Self {
        Self {
            rdata,
            slverr: false,
        }
    }

    /// An errored read; data reads as zero.
    pub fn error() -> Self {
        Self {
            rdata: 0,
            slverr: true,
        }
    }
}

/// Register-level model of an APB slave.
///
/// Offsets are byte addresses relative to the block's base; accesses are
/// word-sized with byte strobes. Implementors decide which offsets exist —
/// unmapped ones answer with a slave error.
pub trait RegisterBlock {
    /// Short name for trace output (e.g. `"PLIC"`, `"UART0"`).
    fn name(&self) -> &str;

    /// Reads the word at `offset`. May have side effects (claim registers,
    /// FIFO pops) exactly as the modeled hardware does.
    fn read_u32(&mut self, offset: u32) -> BusResponse;

    /// Writes `value` at `offset` under the byte-strobe mask `strb`
    /// (bit *i* enables byte lane *i*). Returns `true` to flag `pslverr`.
    fn write_u32(&mut self, offset: u32, value: u32, strb: u8) -> bool;
}
