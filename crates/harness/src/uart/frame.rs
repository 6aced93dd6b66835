//! Serial frame configuration.
//!
//! Closed enums for every line parameter, each carrying its own LCR/FCR bit
//! encoding so register programming and wire-level framing can never drift
//! apart. A [`SerialFrame`] bundles one complete line configuration.

use serde::Deserialize;

use crate::sim::SimDuration;

/// Number of data bits per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum WordLength {
    /// 5 data bits.
    Five,
    /// 6 data bits.
    Six,
    /// 7 data bits.
    Seven,
    /// 8 data bits.
    #[default]
    Eight,
}

impl WordLength {
    /// LCR bits [1:0].
    pub fn lcr_bits(self) -> u8 {
        match self {
            Self::Five => 0b00,
            Self::Six => 0b01,
            Self::Seven => 0b10,
            Self::Eight => 0b11,
        }
    }

    /// Data bits per character.
    pub fn length(self) -> u32 {
        u32::from(self.lcr_bits()) + 5
    }

    /// Mask selecting the transferable bits of a byte.
    pub fn mask(self) -> u8 {
        ((1u16 << self.length()) - 1) as u8
    }

    /// Masks a byte to the transferable width.
    pub fn cast(self, byte: u8) -> u8 {
        byte & self.mask()
    }

    /// Masks every character of `s` to the transferable width.
    ///
    /// Expected values for sub-8-bit configurations are computed with this.
    pub fn cast_str(self, s: &str) -> String {
        s.bytes().map(|b| char::from(b & self.mask())).collect()
    }
}

/// Number of stop bits per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum StopMode {
    /// One stop bit.
    #[default]
    Single,
    /// Two stop bits.
    Double,
}

impl StopMode {
    /// LCR bit [2].
    pub fn lcr_bits(self) -> u8 {
        match self {
            Self::Single => 0b0_00,
            Self::Double => 0b1_00,
        }
    }

    /// Stop bits per character.
    pub fn count(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
        }
    }
}

/// Parity generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ParityMode {
    /// No parity bit in the frame.
    #[default]
    None,
    /// Parity makes the total one-count odd.
    Odd,
    /// Parity makes the total one-count even.
    Even,
    /// Parity stuck at 1.
    Force1,
    /// Parity stuck at 0.
    Force0,
}

impl ParityMode {
    /// LCR bits [5:3].
    pub fn lcr_bits(self) -> u8 {
        match self {
            Self::None => 0b000_000,
            Self::Odd => 0b001_000,
            Self::Even => 0b011_000,
            Self::Force1 => 0b101_000,
            Self::Force0 => 0b111_000,
        }
    }

    /// Parity bit for `data`, or `None` when the frame carries no parity.
    pub fn generate(self, data: u8) -> Option<u8> {
        let ones = (data.count_ones() & 1) as u8;
        match self {
            Self::None => None,
            Self::Odd => Some(ones ^ 1),
            Self::Even => Some(ones),
            Self::Force1 => Some(1),
            Self::Force0 => Some(0),
        }
    }
}

/// Receive-FIFO depth at which the data-ready interrupt fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum TriggerLevel {
    /// Interrupt per character.
    #[default]
    One,
    /// Interrupt at 4 characters.
    Four,
    /// Interrupt at 8 characters.
    Eight,
    /// Interrupt at 14 characters.
    Fourteen,
}

impl TriggerLevel {
    /// FCR bits [7:6].
    pub fn fcr_bits(self) -> u8 {
        match self {
            Self::One => 0b00_000000,
            Self::Four => 0b01_000000,
            Self::Eight => 0b10_000000,
            Self::Fourteen => 0b11_000000,
        }
    }

    /// FIFO depth threshold.
    pub fn depth(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Four => 4,
            Self::Eight => 8,
            Self::Fourteen => 14,
        }
    }
}

/// One complete serial line configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerialFrame {
    /// Line rate in bits per second.
    pub baud_rate: u32,
    /// Data bits per character.
    pub word_len: WordLength,
    /// Parity mode.
    pub parity: ParityMode,
    /// Stop-bit count.
    pub stop: StopMode,
}

impl Default for SerialFrame {
    /// 115200-8N1.
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            word_len: WordLength::Eight,
            parity: ParityMode::None,
            stop: StopMode::Single,
        }
    }
}

impl SerialFrame {
    /// One bit period on the wire.
    pub fn bit_period(&self) -> SimDuration {
        SimDuration::from_baud(self.baud_rate)
    }

    /// The LCR value programming this configuration (DLAB clear).
    pub fn lcr_bits(&self) -> u8 {
        self.parity.lcr_bits() | self.stop.lcr_bits() | self.word_len.lcr_bits()
    }
}
