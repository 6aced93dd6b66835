//! Verification harness for a small RISC-V SoC's peripherals.
//!
//! This crate implements the testbench side of a cycle-accurate SoC
//! verification environment with the following:
//! 1. **Sim:** Deterministic discrete-event substrate — signals, triggers,
//!    cooperative tasks, clock generation.
//! 2. **APB:** Blocking register transactor with byte strobes and
//!    slave-error checking, plus the slave-model contract.
//! 3. **UART:** Bit-banging line codec (framing/parity checks, fault
//!    injection) and the register-level character driver.
//! 4. **PLIC:** Interrupt-arbitration reference model with the full memory
//!    map, claim/complete gating, and scenario source/target entities.
//! 5. **Mem:** Backdoor binary loading for test setup.
//!
//! Protocol mismatches are fatal to the running scenario and surface as
//! [`TbError`] with expected-vs-observed diagnostics.

/// APB bus master and slave-model contract.
pub mod apb;
/// Shared error taxonomy.
pub mod common;
/// Harness configuration (defaults, JSON form).
pub mod config;
/// RAM backdoor loading.
pub mod mem;
/// PLIC reference model, register map, and driver.
pub mod plic;
/// Discrete-event simulation substrate.
pub mod sim;
/// UART codec, register map, and driver.
pub mod uart;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Scenario-failure taxonomy and result alias.
pub use crate::common::{TbError, TbResult};
/// Scheduler handle; construct signals and tasks through it.
pub use crate::sim::Scheduler;
