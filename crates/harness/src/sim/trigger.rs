//! Suspension primitives.
//!
//! The harness suspends only at explicit points, mirroring the trigger set a
//! discrete-event simulator exposes:
//! 1. **[`Timer`]:** resolves after a fixed span of simulated time.
//! 2. **[`Edge`]:** resolves at a rising or falling transition of a signal.
//! 3. **[`with_timeout`]:** first-of composition of any future against a
//!    timer; the losing branch is abandoned, never polled again.
//!
//! All triggers arm lazily on first poll, against the task being polled, and
//! complete via a shared fired flag the scheduler sets. A stale wake (e.g.
//! from a timer whose task has moved on) re-polls the task's current leaf
//! future, which simply reports pending again.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{Context, Poll};

use crate::common::error::{TbError, TbResult};
use crate::sim::scheduler::{Kernel, Scheduler};
use crate::sim::signal::{EdgeKind, Signal};
use crate::sim::time::SimDuration;

/// Future resolving after a fixed span of simulated time.
///
/// Created by [`Scheduler::delay`].
#[derive(Debug)]
pub struct Timer {
    kernel: Weak<RefCell<Kernel>>,
    dur: SimDuration,
    fired: Option<Rc<Cell<bool>>>,
}

impl Timer {
    pub(crate) fn new(scheduler: Scheduler, dur: SimDuration) -> Self {
        Self {
            kernel: scheduler.kernel(),
            dur,
            fired: None,
        }
    }
}

impl Future for Timer {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &this.fired {
            Some(flag) if flag.get() => Poll::Ready(()),
            Some(_) => Poll::Pending,
            None => {
                let Some(kernel) = this.kernel.upgrade() else {
                    // Scheduler gone; nothing will ever fire this timer.
                    return Poll::Pending;
                };
                let flag = kernel.borrow_mut().park_timer(this.dur);
                this.fired = Some(flag);
                Poll::Pending
            }
        }
    }
}

/// Future resolving at a signal edge.
///
/// Created by [`Signal::rising_edge`] / [`Signal::falling_edge`].
#[derive(Debug)]
pub struct Edge {
    signal: Signal,
    kind: EdgeKind,
    fired: Option<Rc<Cell<bool>>>,
}

impl Edge {
    pub(crate) fn new(signal: Signal, kind: EdgeKind) -> Self {
        Self {
            signal,
            kind,
            fired: None,
        }
    }
}

impl Future for Edge {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &this.fired {
            Some(flag) if flag.get() => Poll::Ready(()),
            Some(_) => Poll::Pending,
            None => {
                match this.signal.park(this.kind) {
                    Some(flag) => this.fired = Some(flag),
                    // Scheduler gone; the edge can never arrive.
                    None => return Poll::Pending,
                }
                Poll::Pending
            }
        }
    }
}

/// Awaits `fut`, bounding the wait to `limit` of simulated time.
///
/// When the timer wins, the awaited future is dropped where it stands; any
/// timers or edge waiters it parked go stale and are skipped when they fire.
/// `waiting` names the awaited event in the [`TbError::Timeout`] diagnostic.
pub async fn with_timeout<F: Future>(
    scheduler: &Scheduler,
    limit: SimDuration,
    waiting: &'static str,
    fut: F,
) -> TbResult<F::Output> {
    let mut fut = Box::pin(fut);
    let mut timer = scheduler.delay(limit);
    std::future::poll_fn(move |cx| {
        if let Poll::Ready(value) = fut.as_mut().poll(cx) {
            return Poll::Ready(Ok(value));
        }
        if Pin::new(&mut timer).poll(cx).is_ready() {
            return Poll::Ready(Err(TbError::Timeout {
                waiting,
                after: limit,
            }));
        }
        Poll::Pending
    })
    .await
}
