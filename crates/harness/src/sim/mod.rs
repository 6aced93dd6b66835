//! Discrete-event simulation substrate.
//!
//! The harness talks to a simulated design exclusively through this module:
//! 1. **Time:** Picosecond instants and spans ([`SimTime`], [`SimDuration`]).
//! 2. **Signals:** Named wires with get/set and edge waits ([`Signal`]).
//! 3. **Scheduling:** A deterministic cooperative event loop ([`Scheduler`]).
//! 4. **Triggers:** Timers, edges, and bounded first-of waits.
//! 5. **Clocking:** Square-wave generation ([`Clock`]).
//!
//! The kernel here stands in for an external RTL simulator: protocol layers
//! only consume the signal/trigger contract, so swapping in a different
//! backend is a matter of reimplementing this surface.

pub mod clock;
pub mod scheduler;
pub mod signal;
pub mod time;
pub mod trigger;

pub use clock::Clock;
pub use scheduler::{Scheduler, TaskHandle};
pub use signal::{EdgeKind, Signal};
pub use time::{SimDuration, SimTime};
pub use trigger::{Edge, Timer, with_timeout};
