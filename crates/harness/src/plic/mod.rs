//! PLIC verification stack.
//!
//! 1. **Regs:** The interrupt controller's memory map.
//! 2. **Model:** The arbitration reference model ([`Plic`]) plus the
//!    scenario-owned source/target entities.
//! 3. **Driver:** Register-level claim/complete traffic over APB.

pub mod driver;
pub mod model;
pub mod regs;

pub use driver::PlicDriver;
pub use model::{IntSource, IntTarget, Plic};
