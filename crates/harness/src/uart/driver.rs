//! Register-level UART driver.
//!
//! The software-visible face of the UART: programs the line over APB, then
//! moves characters through THR/RHR with LSR status polling. Bit-level
//! traffic is the [codec](crate::uart::codec)'s job; this driver only ever
//! touches registers.

use tracing::debug;

use crate::apb::ApbMaster;
use crate::common::error::TbResult;
use crate::uart::frame::{SerialFrame, TriggerLevel};
use crate::uart::regs::{
    FCR_FIFO_ENABLE, ISR_INT_MASK, LCR_DLAB, LSR_DATA_READY, LSR_THR_EMPTY, MCR_LOOPBACK, REG_DLL,
    REG_DLM, REG_FCR, REG_IER, REG_ISR, REG_LCR, REG_LSR, REG_MCR, REG_RHR, REG_THR,
};

/// Clock cycles between LSR status polls.
const POLL_INTERVAL: u32 = 100;

/// Register-level driver for one UART instance.
#[derive(Debug, Clone)]
pub struct UartDriver {
    apb: ApbMaster,
    clk_freq: u32,
}

impl UartDriver {
    /// Creates a driver over `apb`; `clk_freq` is the UART input clock used
    /// for divisor programming.
    pub fn new(apb: ApbMaster, clk_freq: u32) -> Self {
        Self { apb, clk_freq }
    }

    /// The underlying bus master.
    pub fn apb(&self) -> &ApbMaster {
        &self.apb
    }

    /// Programs the divisor latches and LCR for `frame`.
    ///
    /// Sets DLAB, writes DLL/DLM with `round(clk_freq / (16 * baud))`, then
    /// writes the final LCR (DLAB clear) with the frame's encoding.
    pub async fn line_setup(&self, frame: &SerialFrame) -> TbResult<()> {
        let divisor =
            (f64::from(self.clk_freq) / (16.0 * f64::from(frame.baud_rate))).round() as u32;
        debug!(divisor, lcr = frame.lcr_bits(), "uart line setup");

        self.apb.write_byte(REG_LCR, LCR_DLAB).await?;
        self.apb.write_byte(REG_DLL, (divisor & 0xff) as u8).await?;
        self.apb
            .write_byte(REG_DLM, ((divisor >> 8) & 0xff) as u8)
            .await?;
        self.apb.write_byte(REG_LCR, frame.lcr_bits()).await?;
        Ok(())
    }

    /// Programs the FCR: FIFO enable and receive trigger level.
    pub async fn fifo_setup(&self, enable: bool, trigger: TriggerLevel) -> TbResult<()> {
        let fcr = trigger.fcr_bits() | if enable { FCR_FIFO_ENABLE } else { 0 };
        self.apb.write_byte(REG_FCR, fcr).await
    }

    /// Writes the interrupt-enable mask.
    pub async fn set_ier(&self, mask: u8) -> TbResult<()> {
        self.apb.write_byte(REG_IER, mask).await
    }

    /// Reads the ISR and returns the 4-bit interrupt code.
    pub async fn isr_code(&self) -> TbResult<u8> {
        Ok(self.apb.read_byte(REG_ISR).await? & ISR_INT_MASK)
    }

    /// Reads the line status register.
    pub async fn lsr(&self) -> TbResult<u8> {
        self.apb.read_byte(REG_LSR).await
    }

    /// Switches internal loopback (MCR) on or off.
    pub async fn set_loopback(&self, enable: bool) -> TbResult<()> {
        self.apb
            .write_byte(REG_MCR, if enable { MCR_LOOPBACK } else { 0 })
            .await
    }

    /// Sends one character, polling LSR until THR is empty.
    pub async fn send_char(&self, c: u8) -> TbResult<()> {
        loop {
            if self.lsr().await? & LSR_THR_EMPTY != 0 {
                return self.apb.write_byte(REG_THR, c).await;
            }
            self.apb.bus().clk.cycles(POLL_INTERVAL).await;
        }
    }

    /// Sends a string one character at a time.
    pub async fn send_str(&self, s: &str) -> TbResult<()> {
        for b in s.bytes() {
            self.send_char(b).await?;
        }
        Ok(())
    }

    /// Receives one character, polling LSR until data is ready.
    pub async fn recv_char(&self) -> TbResult<u8> {
        loop {
            if let Some(c) = self.try_recv_char().await? {
                return Ok(c);
            }
            self.apb.bus().clk.cycles(POLL_INTERVAL).await;
        }
    }

    /// Single status check: pops RHR only when LSR reports data ready.
    pub async fn try_recv_char(&self) -> TbResult<Option<u8>> {
        if self.lsr().await? & LSR_DATA_READY != 0 {
            Ok(Some(self.apb.read_byte(REG_RHR).await?))
        } else {
            Ok(None)
        }
    }

    /// Receives exactly `num` characters, polling as needed.
    pub async fn recv_str(&self, num: usize) -> TbResult<String> {
        let mut s = String::with_capacity(num);
        for _ in 0..num {
            s.push(char::from(self.recv_char().await?));
        }
        Ok(s)
    }

    /// Drains up to `max` already-buffered characters without polling;
    /// stops at the first not-ready status.
    pub async fn drain_str(&self, max: usize) -> TbResult<String> {
        let mut s = String::new();
        for _ in 0..max {
            match self.try_recv_char().await? {
                Some(c) => s.push(char::from(c)),
                None => break,
            }
        }
        Ok(s)
    }
}
