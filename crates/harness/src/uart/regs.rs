//! 16550-style UART register map and bit flags.
//!
//! Byte offsets on the APB port. The divisor latches (DLL/DLM) alias
//! THR/RHR and IER while the LCR DLAB bit is set: register meaning depends
//! on that transient latch state, not on a separate address.

/// Transmitter Holding Register (write).
pub const REG_THR: u32 = 0;
/// Receiver Holding Register (read).
pub const REG_RHR: u32 = 0;
/// Divisor Latch Low (DLAB=1).
pub const REG_DLL: u32 = 0;
/// Interrupt Enable Register.
pub const REG_IER: u32 = 1;
/// Divisor Latch High (DLAB=1).
pub const REG_DLM: u32 = 1;
/// FIFO Control Register (write).
pub const REG_FCR: u32 = 2;
/// Interrupt Status Register (read).
pub const REG_ISR: u32 = 2;
/// Line Control Register.
pub const REG_LCR: u32 = 3;
/// Modem Control Register.
pub const REG_MCR: u32 = 4;
/// Line Status Register.
pub const REG_LSR: u32 = 5;
/// Modem Status Register.
pub const REG_MSR: u32 = 6;
/// Scratch Pad Register.
pub const REG_SPR: u32 = 7;

/// IER: receive data ready interrupt enable.
pub const IER_RX_DATA_READY: u8 = 0x01;
/// IER: transmitter holding register empty interrupt enable.
pub const IER_THR_EMPTY: u8 = 0x02;
/// IER: receiver line status interrupt enable.
pub const IER_RX_LINE_STAT: u8 = 0x04;

/// ISR: mask selecting the interrupt code bits.
pub const ISR_INT_MASK: u8 = 0x0f;
/// ISR code: no interrupt pending.
pub const ISR_INT_NONE: u8 = 0b0001;
/// ISR code: transmitter holding register empty.
pub const ISR_INT_THR_EMPTY: u8 = 0b0010;
/// ISR code: receive data ready.
pub const ISR_INT_RX_DATA_READY: u8 = 0b0100;
/// ISR code: receiver line status (overrun/parity/framing/break).
pub const ISR_INT_RX_LINE_STAT: u8 = 0b0110;
/// ISR code: receive timeout (stale data below the trigger level).
pub const ISR_INT_RX_TIMEOUT: u8 = 0b1100;

/// FCR: FIFO enable.
pub const FCR_FIFO_ENABLE: u8 = 0x01;

/// LCR: divisor latch access bit.
pub const LCR_DLAB: u8 = 0x80;

/// MCR: internal loopback (tx folded onto rx).
pub const MCR_LOOPBACK: u8 = 0x10;

/// LSR: receive data ready.
pub const LSR_DATA_READY: u8 = 0x01;
/// LSR: receiver overrun error.
pub const LSR_OVERRUN_ERR: u8 = 0x02;
/// LSR: parity error on a received character.
pub const LSR_PARITY_ERR: u8 = 0x04;
/// LSR: framing error on a received character.
pub const LSR_FRAME_ERR: u8 = 0x08;
/// LSR: break condition observed.
pub const LSR_BREAK_INT: u8 = 0x10;
/// LSR: transmitter holding register empty.
pub const LSR_THR_EMPTY: u8 = 0x20;
/// LSR: transmitter fully idle.
pub const LSR_TX_EMPTY: u8 = 0x40;
/// LSR: an error is buried somewhere in the receive FIFO.
pub const LSR_FIFO_ERR: u8 = 0x80;
