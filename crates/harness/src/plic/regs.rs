//! PLIC register map.
//!
//! Byte-addressed APB offsets:
//!
//! * `0x0000000 + 4*src`: per-source priority.
//! * `0x0001000`: pending bitmap (word per 32 sources).
//! * `0x0002000 + 0x80*tgt`: per-target enable bitmap.
//! * `0x0200000 + 0x1000*tgt`: per-target threshold.
//! * `0x0200004 + 0x1000*tgt`: claim (read) / complete (write).

/// Base of the per-source priority registers.
pub const PRIORITY_BASE: u32 = 0x000_0000;

/// Base of the pending bitmap.
pub const PENDING_BASE: u32 = 0x000_1000;

/// Base of the per-target enable bitmaps.
pub const ENABLE_BASE: u32 = 0x000_2000;

/// Stride between targets' enable bitmaps.
pub const ENABLE_STRIDE: u32 = 0x80;

/// Base of the per-target context blocks (threshold, claim/complete).
pub const CONTEXT_BASE: u32 = 0x020_0000;

/// Stride between targets' context blocks.
pub const CONTEXT_STRIDE: u32 = 0x1000;

/// Offset of the claim/complete register within a context block.
pub const CONTEXT_CLAIM: u32 = 0x4;
