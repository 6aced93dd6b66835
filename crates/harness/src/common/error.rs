//! Scenario-failure taxonomy.
//!
//! Every checked protocol step in the harness reports mismatches through
//! [`TbError`]. Failures are fatal to the owning scenario: no layer retries,
//! and polling loops are protocol behavior rather than error recovery. The
//! variants fall into three families:
//! 1. **Protocol violations:** a sampled wire or bus response disagrees with
//!    the expectation (framing, parity, slave error).
//! 2. **Arbitration violations:** the interrupt reference model and the
//!    observed claim/complete traffic diverge.
//! 3. **Timeouts:** a bounded wait elapsed before its event.

use crate::sim::time::SimDuration;

/// Failure raised by a harness protocol layer.
///
/// Diagnostics always carry the expected and observed values so a failing
/// scenario log identifies the mismatch without waveform digging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TbError {
    /// A start or stop bit sampled at the wrong level.
    #[error("framing violation: {bit} bit sampled {observed} (expected {expected})")]
    FramingViolation {
        /// Which frame bit misbehaved (`"start"` or `"stop"`).
        bit: &'static str,
        /// Level the frame requires.
        expected: u8,
        /// Level actually sampled.
        observed: u8,
    },

    /// The received parity bit disagrees with the configured generator.
    #[error("parity violation: parity bit sampled {observed} (expected {expected})")]
    ParityViolation {
        /// Parity the generator computed over the data bits.
        expected: u8,
        /// Parity actually sampled.
        observed: u8,
    },

    /// `pslverr` at the ready cycle did not match the transaction's expectation.
    #[error("slave error mismatch at {addr:#010x}: pslverr={observed} (expected {expected})")]
    SlaveErrMismatch {
        /// Bus address of the offending transaction.
        addr: u32,
        /// Whether the transaction expected a slave error.
        expected: bool,
        /// Whether `pslverr` was asserted when `pready` rose.
        observed: bool,
    },

    /// A claim returned a source id outside the target's visible set.
    #[error("arbitration violation: target {target} claimed source {claimed}, which it cannot see")]
    ClaimViolation {
        /// Target that issued the claim.
        target: u32,
        /// Source id the claim returned.
        claimed: u32,
    },

    /// A source's pending counter would go negative.
    #[error("arbitration violation: pending underflow on source {source}")]
    PendingUnderflow {
        /// Source whose counter was over-cleared.
        source: u32,
    },

    /// A bounded wait elapsed before the awaited event occurred.
    #[error("timeout: gave up on {waiting} after {after}")]
    Timeout {
        /// Human-readable description of the awaited event.
        waiting: &'static str,
        /// How long the wait was bounded to.
        after: SimDuration,
    },
}

/// Result alias used by every fallible harness operation.
pub type TbResult<T> = Result<T, TbError>;
