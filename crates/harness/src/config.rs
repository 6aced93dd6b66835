//! Harness configuration.
//!
//! Defines the knobs a scenario can turn without editing code:
//! 1. **Defaults:** Baseline clocking and topology constants.
//! 2. **Structures:** Per-peripheral config blocks under one [`Config`].
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built in code
//! with `Config::default()`.

use serde::Deserialize;

use crate::uart::SerialFrame;

/// Default configuration constants for the harness.
mod defaults {
    /// Default serial line rate.
    pub const BAUD_RATE: u32 = 115_200;

    /// UART input clock: the classic 16x oversampling of the default baud.
    pub const UART_CLK_FREQ: u32 = BAUD_RATE * 16;

    /// PLIC bus clock frequency (1 MHz).
    pub const PLIC_CLK_FREQ: u32 = 1_000_000;

    /// Interrupt sources wired to the controller.
    pub const PLIC_SOURCES: u32 = 8;

    /// Interrupt targets served by the controller.
    pub const PLIC_TARGETS: u32 = 8;

    /// Clock cycles `rst_n` is held low at the start of a scenario.
    pub const RESET_CYCLES: u32 = 5;
}

/// UART scenario parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UartConfig {
    /// Input clock feeding the UART's divisor chain.
    pub clk_freq: u32,
    /// Line configuration driven and sampled by the harness.
    pub frame: SerialFrame,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            clk_freq: defaults::UART_CLK_FREQ,
            frame: SerialFrame::default(),
        }
    }
}

/// PLIC scenario parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlicConfig {
    /// Bus clock frequency.
    pub clk_freq: u32,
    /// Number of interrupt sources (ids 1..=sources).
    pub sources: u32,
    /// Number of interrupt targets (ids 0..targets).
    pub targets: u32,
}

impl Default for PlicConfig {
    fn default() -> Self {
        Self {
            clk_freq: defaults::PLIC_CLK_FREQ,
            sources: defaults::PLIC_SOURCES,
            targets: defaults::PLIC_TARGETS,
        }
    }
}

/// Root harness configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UART scenario parameters.
    pub uart: UartConfig,
    /// PLIC scenario parameters.
    pub plic: PlicConfig,
    /// Reset-sequence length in clock cycles.
    pub reset_cycles: Option<u32>,
}

impl Config {
    /// Clock cycles `rst_n` is held low at reset.
    pub fn reset_cycles(&self) -> u32 {
        self.reset_cycles.unwrap_or(defaults::RESET_CYCLES)
    }

    /// Parses a configuration from its JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
