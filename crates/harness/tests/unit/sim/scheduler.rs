//! Scheduler semantics: time, determinism, delta cycles, bounded waits.

use std::cell::RefCell;
use std::rc::Rc;

use rvtb_core::TbError;
use rvtb_core::sim::{Clock, Scheduler, SimDuration, SimTime, with_timeout};

use crate::common::harness::init_tracing;

// ══════════════════════════════════════════════════════════
// 1. Timers and simulated time
// ══════════════════════════════════════════════════════════

#[test]
fn timers_advance_simulated_time() {
    init_tracing();
    let sim = Scheduler::new();
    let handle = sim.clone();
    let end = sim.run(async move {
        assert_eq!(handle.now(), SimTime::ZERO);
        handle.delay(SimDuration::from_nanos(5)).await;
        assert_eq!(handle.now().as_ps(), 5_000);
        handle.delay(SimDuration::from_nanos(3)).await;
        handle.now()
    });
    assert_eq!(end.as_ps(), 8_000);
}

#[test]
fn equal_deadlines_fire_in_arming_order() {
    init_tracing();
    let sim = Scheduler::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    for id in 0..4u32 {
        let handle = sim.clone();
        let log = Rc::clone(&order);
        let _task = sim.spawn(async move {
            handle.delay(SimDuration::from_nanos(10)).await;
            log.borrow_mut().push(id);
        });
    }

    let handle = sim.clone();
    sim.run(async move {
        handle.delay(SimDuration::from_nanos(20)).await;
    });
    assert_eq!(*order.borrow(), vec![0, 1, 2, 3]);
}

// ══════════════════════════════════════════════════════════
// 2. Delta cycles: post-edge snapshot semantics
// ══════════════════════════════════════════════════════════

/// Two tasks woken by the same clock edge: the first drives a signal, the
/// second must still observe the pre-edge value. The write only commits
/// once the whole wake batch has run.
#[test]
fn same_edge_tasks_see_consistent_snapshot() {
    init_tracing();
    let sim = Scheduler::new();
    let clk = sim.signal("clk");
    let data = sim.signal("data");
    let seen = Rc::new(RefCell::new(None));

    {
        let clk = clk.clone();
        let data = data.clone();
        let _writer = sim.spawn(async move {
            clk.rising_edge().await;
            data.set(1);
        });
    }
    {
        let clk = clk.clone();
        let data = data.clone();
        let seen = Rc::clone(&seen);
        let _reader = sim.spawn(async move {
            clk.rising_edge().await;
            *seen.borrow_mut() = Some(data.get());
        });
    }

    let handle = sim.clone();
    let clk_main = clk.clone();
    let data_main = data.clone();
    sim.run(async move {
        handle.delay(SimDuration::from_nanos(1)).await;
        clk_main.set(1);
        handle.delay(SimDuration::from_nanos(1)).await;
        // The reader saw the old value; the write has committed since.
        assert_eq!(data_main.get(), 1);
    });
    assert_eq!(*seen.borrow(), Some(0));
}

#[test]
fn clock_cycles_count_rising_edges() {
    init_tracing();
    let sim = Scheduler::new();
    let clk = sim.signal("clk");
    let _clock = Clock::new(clk.clone(), SimDuration::from_nanos(10)).start(&sim);

    let handle = sim.clone();
    sim.run(async move {
        clk.cycles(3).await;
        // First rising edge lands at t=0 (delta), then every full period.
        assert_eq!(handle.now().as_ps(), 20_000);
    });
}

// ══════════════════════════════════════════════════════════
// 3. Bounded waits
// ══════════════════════════════════════════════════════════

#[test]
fn with_timeout_passes_through_the_event() {
    init_tracing();
    let sim = Scheduler::new();
    let handle = sim.clone();
    let result = sim.run(async move {
        let inner = handle.clone();
        with_timeout(&handle, SimDuration::from_micros(1), "prompt event", async move {
            inner.delay(SimDuration::from_nanos(50)).await;
            42u32
        })
        .await
    });
    assert_eq!(result.unwrap(), 42);
}

#[test]
fn with_timeout_reports_the_lost_wait() {
    init_tracing();
    let sim = Scheduler::new();
    let never = sim.signal("never");
    let handle = sim.clone();
    let result = sim.run(async move {
        with_timeout(
            &handle,
            SimDuration::from_micros(2),
            "an edge nothing drives",
            never.rising_edge(),
        )
        .await
    });
    match result {
        Err(TbError::Timeout { waiting, after }) => {
            assert_eq!(waiting, "an edge nothing drives");
            assert_eq!(after, SimDuration::from_micros(2));
        }
        other => panic!("expected a timeout, got {other:?}"),
    }
}

/// A task abandoned by a timeout must not disturb anything that runs later.
#[test]
fn abandoned_wait_does_not_leak_wakeups() {
    init_tracing();
    let sim = Scheduler::new();
    let line = sim.signal("line");
    let handle = sim.clone();

    sim.run(async move {
        let early = with_timeout(
            &handle,
            SimDuration::from_nanos(10),
            "edge before the deadline",
            line.rising_edge(),
        )
        .await;
        assert!(early.is_err());

        // Drive the edge the abandoned wait was parked on, then keep going.
        line.set(1);
        handle.delay(SimDuration::from_nanos(10)).await;
        line.set(0);
        handle.delay(SimDuration::from_nanos(10)).await;

        // A fresh wait on the same signal must still work cleanly.
        let driver_sim = handle.clone();
        let driver_line = line.clone();
        let _driver = handle.spawn(async move {
            driver_sim.delay(SimDuration::from_nanos(30)).await;
            driver_line.set(1);
        });
        let eventual = with_timeout(
            &handle,
            SimDuration::from_micros(1),
            "edge after recovery",
            async {
                line.rising_edge().await;
                line.get()
            },
        )
        .await;
        assert_eq!(eventual.unwrap(), 1);
    });
}
