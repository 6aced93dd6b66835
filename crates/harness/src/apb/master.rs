//! APB master transactor.

use tracing::trace;

use crate::common::error::{TbError, TbResult};
use crate::sim::{Scheduler, Signal};

/// Wire-level signals of one APB port.
///
/// Handles are clones of the scheduler's signals; the master, a slave model,
/// and assertions in a test can all watch the same wires.
#[derive(Debug, Clone)]
pub struct ApbBus {
    /// Bus clock; every phase change aligns to its rising edge.
    pub clk: Signal,
    /// Slave select.
    pub psel: Signal,
    /// ACCESS-phase qualifier.
    pub penable: Signal,
    /// Transfer direction (1 = write).
    pub pwrite: Signal,
    /// Byte address.
    pub paddr: Signal,
    /// Write data.
    pub pwdata: Signal,
    /// Byte-lane write strobes.
    pub pwstrb: Signal,
    /// Slave ready; extends the ACCESS phase while low.
    pub pready: Signal,
    /// Slave error, valid at the ready cycle.
    pub pslverr: Signal,
    /// Read data, valid at the ready cycle.
    pub prdata: Signal,
}

impl ApbBus {
    /// Creates the full signal bundle on `scheduler`, all lines idle.
    pub fn new(scheduler: &Scheduler, clk: Signal) -> Self {
        Self {
            clk,
            psel: scheduler.signal("psel"),
            penable: scheduler.signal("penable"),
            pwrite: scheduler.signal("pwrite"),
            paddr: scheduler.signal_init("paddr", 32, 0),
            pwdata: scheduler.signal_init("pwdata", 32, 0),
            pwstrb: scheduler.signal_init("pwstrb", 4, 0),
            pready: scheduler.signal("pready"),
            pslverr: scheduler.signal("pslverr"),
            prdata: scheduler.signal_init("prdata", 32, 0),
        }
    }
}

/// Blocking APB master.
///
/// Each call is one full SETUP→ACCESS round trip: assert the request, wait a
/// clock edge, assert `penable`, then poll `pready` every edge. There is no
/// outstanding-transaction pipelining. At the ready cycle `pslverr` must
/// match the call's expectation; a mismatch is fatal to the scenario.
#[derive(Debug, Clone)]
pub struct ApbMaster {
    bus: ApbBus,
}

impl ApbMaster {
    /// Creates a master driving `bus`.
    pub fn new(bus: ApbBus) -> Self {
        Self { bus }
    }

    /// The signal bundle this master drives.
    pub fn bus(&self) -> &ApbBus {
        &self.bus
    }

    /// Word write with all byte lanes enabled, expecting no slave error.
    pub async fn write(&self, addr: u32, wdata: u32) -> TbResult<()> {
        self.transact(addr, Some(wdata), 0b1111, false).await?;
        Ok(())
    }

    /// Word write that must be answered with `pslverr` asserted.
    pub async fn write_expect_err(&self, addr: u32, wdata: u32) -> TbResult<()> {
        self.transact(addr, Some(wdata), 0b1111, true).await?;
        Ok(())
    }

    /// Word read, expecting no slave error.
    pub async fn read(&self, addr: u32) -> TbResult<u32> {
        self.transact(addr, None, 0, false).await
    }

    /// Word read that must be answered with `pslverr` asserted.
    pub async fn read_expect_err(&self, addr: u32) -> TbResult<u32> {
        self.transact(addr, None, 0, true).await
    }

    /// Byte write: shifts the lane into place and enables one strobe bit.
    pub async fn write_byte(&self, addr: u32, wdata: u8) -> TbResult<()> {
        let lane = addr & 3;
        self.transact(
            addr,
            Some(u32::from(wdata) << (lane * 8)),
            1 << lane,
            false,
        )
        .await?;
        Ok(())
    }

    /// Byte read: extracts the lane selected by `addr & 3`.
    pub async fn read_byte(&self, addr: u32) -> TbResult<u8> {
        let rdata = self.transact(addr, None, 0, false).await?;
        Ok((rdata >> ((addr & 3) * 8)) as u8)
    }

    /// One SETUP→ACCESS round trip.
    ///
    /// `wdata` selects the direction; reads return the captured `prdata`.
    async fn transact(
        &self,
        addr: u32,
        wdata: Option<u32>,
        strb: u8,
        expect_err: bool,
    ) -> TbResult<u32> {
        let bus = &self.bus;

        // SETUP phase: request asserted for exactly one clock edge.
        bus.psel.set(1);
        bus.pwrite.set(u32::from(wdata.is_some()));
        bus.paddr.set(addr);
        if let Some(data) = wdata {
            bus.pwdata.set(data);
        }
        bus.pwstrb.set(u32::from(strb));
        bus.clk.rising_edge().await;
        bus.penable.set(1);

        // ACCESS phase: repeat until the slave reports ready.
        loop {
            bus.clk.rising_edge().await;
            if bus.pready.get() == 1 {
                let observed = bus.pslverr.get() == 1;
                if observed != expect_err {
                    return Err(TbError::SlaveErrMismatch {
                        addr,
                        expected: expect_err,
                        observed,
                    });
                }
                let rdata = bus.prdata.get();
                bus.psel.set(0);
                bus.penable.set(0);
                trace!(
                    addr = format_args!("{addr:#010x}"),
                    write = wdata.is_some(),
                    rdata = format_args!("{rdata:#010x}"),
                    slverr = observed,
                    "apb transfer"
                );
                return Ok(rdata);
            }
        }
    }
}
