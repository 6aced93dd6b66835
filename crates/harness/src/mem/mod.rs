//! RAM backdoor loading.
//!
//! Diagnostic memory injection that bypasses the bus protocol entirely:
//! test setup pokes a binary image straight into the design's RAM words.

pub mod loader;

pub use loader::{BackdoorMemory, load_bin, load_bytes};
