//! UART verification stack.
//!
//! Everything needed to exercise the SoC's serial port from both sides:
//! 1. **Frame:** Line configuration enums and their LCR/FCR encodings.
//! 2. **Timing:** The bit-cadence engine (edge alignment, per-bit waits).
//! 3. **Codec:** Bit-banging transceiver with framing/parity checking and
//!    deliberate fault injection.
//! 4. **Regs:** The 16550-style register map and bit flags.
//! 5. **Driver:** Register-level character I/O over APB.

pub mod codec;
pub mod driver;
pub mod frame;
pub mod regs;
pub mod timing;

pub use codec::{Direction, FaultInjection, UartLine, UartTransaction};
pub use driver::UartDriver;
pub use frame::{ParityMode, SerialFrame, StopMode, TriggerLevel, WordLength};
pub use timing::BitTiming;
