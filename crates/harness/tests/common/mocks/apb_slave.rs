//! APB slave responder.
//!
//! Background task answering the master's SETUP/ACCESS traffic out of any
//! [`RegisterBlock`]. Holds outputs idle until reset releases, inserts a
//! configurable number of wait states, and keeps `pready` asserted until the
//! master deasserts its request.

use std::cell::RefCell;
use std::rc::Rc;

use rvtb_core::apb::{ApbBus, RegisterBlock};
use rvtb_core::sim::{Scheduler, Signal, TaskHandle};

/// Spawns the responder for `bus`, serving accesses from `dev`.
pub fn start_apb_slave<D: RegisterBlock + 'static>(
    sim: &Scheduler,
    bus: ApbBus,
    rst_n: Signal,
    dev: Rc<RefCell<D>>,
    wait_states: u32,
) -> TaskHandle<()> {
    sim.spawn(async move {
        while !rst_n.is_high() {
            bus.clk.rising_edge().await;
        }
        loop {
            bus.clk.rising_edge().await;

            if bus.pready.is_high() {
                // The master saw ready and deasserted; retire the transfer.
                if !bus.psel.is_high() || !bus.penable.is_high() {
                    bus.pready.set(0);
                    bus.pslverr.set(0);
                }
                continue;
            }

            if bus.psel.is_high() && bus.penable.is_high() {
                for _ in 0..wait_states {
                    bus.clk.rising_edge().await;
                }
                let addr = bus.paddr.get();
                if bus.pwrite.is_high() {
                    let err =
                        dev.borrow_mut()
                            .write_u32(addr, bus.pwdata.get(), bus.pwstrb.get() as u8);
                    bus.pslverr.set(u32::from(err));
                } else {
                    let resp = dev.borrow_mut().read_u32(addr);
                    bus.prdata.set(resp.rdata);
                    bus.pslverr.set(u32::from(resp.slverr));
                }
                bus.pready.set(1);
            }
        }
    })
}
