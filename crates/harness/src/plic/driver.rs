//! Register-level PLIC driver.
//!
//! Thin address arithmetic over the APB master: each helper is one register
//! transaction against the interrupt controller's memory map.

use crate::apb::ApbMaster;
use crate::common::error::TbResult;
use crate::plic::regs::{
    CONTEXT_BASE, CONTEXT_CLAIM, CONTEXT_STRIDE, ENABLE_BASE, ENABLE_STRIDE, PENDING_BASE,
    PRIORITY_BASE,
};

/// Register-level driver for one PLIC instance.
#[derive(Debug, Clone)]
pub struct PlicDriver {
    apb: ApbMaster,
}

impl PlicDriver {
    /// Creates a driver over `apb`.
    pub fn new(apb: ApbMaster) -> Self {
        Self { apb }
    }

    /// The underlying bus master.
    pub fn apb(&self) -> &ApbMaster {
        &self.apb
    }

    /// Programs a source's priority.
    pub async fn set_priority(&self, src: u32, value: u32) -> TbResult<()> {
        self.apb.write(PRIORITY_BASE + 4 * src, value).await
    }

    /// Reads one source's pending bit.
    pub async fn is_pending(&self, src: u32) -> TbResult<bool> {
        let word = self.apb.read(PENDING_BASE + 4 * (src / 32)).await?;
        Ok(word & (1 << (src % 32)) != 0)
    }

    /// Reads the full pending bitmap (both words).
    pub async fn pending_mask(&self) -> TbResult<u64> {
        let lo = self.apb.read(PENDING_BASE).await?;
        let hi = self.apb.read(PENDING_BASE + 4).await?;
        Ok(u64::from(hi) << 32 | u64::from(lo))
    }

    /// Programs a target's enable bitmap (both words).
    pub async fn set_enable(&self, target: u32, mask: u64) -> TbResult<()> {
        let base = ENABLE_BASE + ENABLE_STRIDE * target;
        self.apb.write(base, mask as u32).await?;
        self.apb.write(base + 4, (mask >> 32) as u32).await
    }

    /// Programs a target's threshold.
    pub async fn set_threshold(&self, target: u32, value: u32) -> TbResult<()> {
        self.apb
            .write(CONTEXT_BASE + CONTEXT_STRIDE * target, value)
            .await
    }

    /// Claims for a target; returns the granted source id (0 = none).
    pub async fn claim(&self, target: u32) -> TbResult<u32> {
        self.apb
            .read(CONTEXT_BASE + CONTEXT_STRIDE * target + CONTEXT_CLAIM)
            .await
    }

    /// Completes `src` on behalf of a target.
    pub async fn complete(&self, target: u32, src: u32) -> TbResult<()> {
        self.apb
            .write(CONTEXT_BASE + CONTEXT_STRIDE * target + CONTEXT_CLAIM, src)
            .await
    }
}
