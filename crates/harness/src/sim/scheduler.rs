//! Cooperative discrete-event scheduler.
//!
//! This is the executable form of the simulator contract the harness drives:
//! 1. **Tasks:** Single-threaded cooperative futures, woken in FIFO order.
//! 2. **Timers:** A (time, sequence) ordered queue; equal timestamps fire in
//!    arming order, so runs are fully deterministic.
//! 3. **Delta cycles:** Signal writes queued during a wake batch commit only
//!    after the whole batch has run, then any edge waiters they trigger form
//!    the next batch at the same timestamp.
//!
//! Tasks that lose a bounded wait are abandoned, not cancelled: their parked
//! timers and edge waiters become stale and are skipped when they fire, so an
//! abandoned task cannot leak wakeups into a later scenario.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{Context, Poll, Waker};

use tracing::trace;

use crate::sim::signal::{EdgeKind, Signal, SignalInner};
use crate::sim::time::{SimDuration, SimTime};
use crate::sim::trigger::Timer;

/// Identifier of a spawned task. Never reused within a scheduler.
pub(crate) type TaskId = u64;

/// A timer parked in the event queue.
struct TimerEvent {
    at: SimTime,
    seq: u64,
    task: TaskId,
    fired: Rc<Cell<bool>>,
}

impl PartialEq for TimerEvent {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl Eq for TimerEvent {}

impl PartialOrd for TimerEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerEvent {
    /// Reversed on (time, sequence) so the `BinaryHeap` pops earliest first.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.at, other.seq).cmp(&(self.at, self.seq))
    }
}

/// Scheduler internals shared between handles, signals, and triggers.
pub(crate) struct Kernel {
    now: SimTime,
    next_task: TaskId,
    next_seq: u64,
    current: TaskId,
    tasks: HashMap<TaskId, Pin<Box<dyn Future<Output = ()>>>>,
    ready: VecDeque<TaskId>,
    timers: BinaryHeap<TimerEvent>,
    writes: Vec<(Rc<RefCell<SignalInner>>, u32)>,
}

impl Kernel {
    /// The task currently being polled.
    pub(crate) fn current_task(&self) -> TaskId {
        self.current
    }

    /// Queues a signal write for commit at the end of the current delta.
    pub(crate) fn defer_write(&mut self, signal: Rc<RefCell<SignalInner>>, value: u32) {
        self.writes.push((signal, value));
    }

    /// Parks the current task on a timer; returns the fired flag.
    pub(crate) fn park_timer(&mut self, dur: SimDuration) -> Rc<Cell<bool>> {
        let fired = Rc::new(Cell::new(false));
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(TimerEvent {
            at: self.now + dur,
            seq,
            task: self.current,
            fired: Rc::clone(&fired),
        });
        fired
    }
}

/// Handle to a spawned task.
///
/// The result is stored when the task completes; a task abandoned at the end
/// of a run simply never stores one.
pub struct TaskHandle<T> {
    id: TaskId,
    finished: Rc<Cell<bool>>,
    result: Rc<RefCell<Option<T>>>,
}

impl<T> TaskHandle<T> {
    /// True once the task has run to completion.
    pub fn is_finished(&self) -> bool {
        self.finished.get()
    }

    /// Takes the task's result, if it has completed.
    pub fn take(&self) -> Option<T> {
        self.result.borrow_mut().take()
    }
}

impl<T> fmt::Debug for TaskHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("id", &self.id)
            .field("finished", &self.finished.get())
            .finish()
    }
}

/// Cooperative discrete-event scheduler handle.
///
/// Cloning shares the same event loop. Construct signals and tasks through
/// this handle, then [`run`](Self::run) a root future to completion.
#[derive(Clone)]
pub struct Scheduler {
    kernel: Rc<RefCell<Kernel>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Creates an empty scheduler at time zero.
    pub fn new() -> Self {
        Self {
            kernel: Rc::new(RefCell::new(Kernel {
                now: SimTime::ZERO,
                next_task: 0,
                next_seq: 0,
                current: 0,
                tasks: HashMap::new(),
                ready: VecDeque::new(),
                timers: BinaryHeap::new(),
                writes: Vec::new(),
            })),
        }
    }

    /// Current simulation time.
    pub fn now(&self) -> SimTime {
        self.kernel.borrow().now
    }

    /// Creates a single-bit signal initialized low.
    pub fn signal(&self, name: &str) -> Signal {
        self.signal_init(name, 1, 0)
    }

    /// Creates a signal of `width` bits (1–32) with an initial value.
    ///
    /// The initial value commits immediately; it is the pre-run state of the
    /// wire, not a delta-cycle write.
    pub fn signal_init(&self, name: &str, width: u32, init: u32) -> Signal {
        debug_assert!((1..=32).contains(&width));
        let mask = if width == 32 { u32::MAX } else { (1 << width) - 1 };
        Signal {
            inner: Rc::new(RefCell::new(SignalInner {
                name: name.to_owned(),
                mask,
                value: init & mask,
                waiters: Vec::new(),
            })),
            kernel: Rc::downgrade(&self.kernel),
        }
    }

    /// Future suspending the caller for `dur` of simulated time.
    pub fn delay(&self, dur: SimDuration) -> Timer {
        Timer::new(self.clone(), dur)
    }

    /// Spawns a cooperative task; it first runs at the next scheduling point.
    pub fn spawn<T: 'static>(&self, fut: impl Future<Output = T> + 'static) -> TaskHandle<T> {
        let result = Rc::new(RefCell::new(None));
        let finished = Rc::new(Cell::new(false));
        let slot = Rc::clone(&result);
        let done = Rc::clone(&finished);
        let wrapped = async move {
            let value = fut.await;
            *slot.borrow_mut() = Some(value);
            done.set(true);
        };

        let mut kernel = self.kernel.borrow_mut();
        let id = kernel.next_task;
        kernel.next_task += 1;
        kernel.tasks.insert(id, Box::pin(wrapped));
        kernel.ready.push_back(id);
        trace!(task = id, "spawn");
        TaskHandle {
            id,
            finished,
            result,
        }
    }

    /// Runs the event loop until `fut` completes, returning its output.
    ///
    /// Background tasks still pending when the root completes are abandoned:
    /// their futures are dropped along with any timers or edge waiters they
    /// parked, so one scenario cannot leak wakeups into the next.
    ///
    /// # Panics
    ///
    /// Panics on deadlock: the root is unfinished but no task is runnable and
    /// no timer is pending. This is always a scenario bug (e.g. an unbounded
    /// wait on an edge nothing drives).
    pub fn run<T: 'static>(&self, fut: impl Future<Output = T> + 'static) -> T {
        let root = self.spawn(fut);
        loop {
            self.drain_deltas();
            if root.is_finished() {
                self.abandon_pending();
                match root.take() {
                    Some(value) => return value,
                    None => panic!("root task finished without storing a result"),
                }
            }
            if !self.advance_time() {
                let now = self.now();
                panic!("scheduler deadlock at {now}: no runnable task and no pending timer");
            }
        }
    }

    /// Drops every pending task, timer, and uncommitted write.
    fn abandon_pending(&self) {
        let (tasks, timers, writes) = {
            let mut kernel = self.kernel.borrow_mut();
            kernel.ready.clear();
            (
                std::mem::take(&mut kernel.tasks),
                std::mem::take(&mut kernel.timers),
                std::mem::take(&mut kernel.writes),
            )
        };
        // Dropped outside the borrow: task futures own Scheduler clones.
        drop(tasks);
        drop(timers);
        drop(writes);
    }

    /// Runs ready tasks and delta-cycle commits until the timestep is stable.
    fn drain_deltas(&self) {
        loop {
            loop {
                let next = self.kernel.borrow_mut().ready.pop_front();
                match next {
                    Some(task) => self.poll_task(task),
                    None => break,
                }
            }
            if !self.commit_writes() {
                break;
            }
        }
    }

    /// Polls one task. Stale ids (already completed) are skipped.
    fn poll_task(&self, id: TaskId) {
        let mut fut = {
            let mut kernel = self.kernel.borrow_mut();
            match kernel.tasks.remove(&id) {
                Some(fut) => {
                    kernel.current = id;
                    fut
                }
                None => return,
            }
        };
        let mut cx = Context::from_waker(Waker::noop());
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(()) => trace!(task = id, "task complete"),
            Poll::Pending => {
                let _ = self.kernel.borrow_mut().tasks.insert(id, fut);
            }
        }
    }

    /// Commits queued signal writes and wakes matching edge waiters.
    ///
    /// Returns `true` when any waiter was scheduled (another delta follows).
    fn commit_writes(&self) -> bool {
        let writes = std::mem::take(&mut self.kernel.borrow_mut().writes);
        if writes.is_empty() {
            return false;
        }
        let mut woke = false;
        for (inner, value) in writes {
            let mut signal = inner.borrow_mut();
            let new = value & signal.mask;
            let old = signal.value;
            if new == old {
                continue;
            }
            signal.value = new;
            trace!(signal = %signal.name, old, new, "commit");
            let rising = old & 1 == 0 && new & 1 == 1;
            let falling = old & 1 == 1 && new & 1 == 0;
            let mut parked = Vec::new();
            for waiter in signal.waiters.drain(..) {
                let hit = match waiter.kind {
                    EdgeKind::Rising => rising,
                    EdgeKind::Falling => falling,
                };
                if hit {
                    waiter.fired.set(true);
                    self.kernel.borrow_mut().ready.push_back(waiter.task);
                    woke = true;
                } else {
                    parked.push(waiter);
                }
            }
            signal.waiters = parked;
        }
        woke
    }

    /// Advances to the next timer deadline and wakes everything due then.
    ///
    /// Returns `false` when the timer queue is empty.
    fn advance_time(&self) -> bool {
        let mut kernel = self.kernel.borrow_mut();
        let Some(first) = kernel.timers.peek() else {
            return false;
        };
        let now = first.at;
        kernel.now = now;
        while let Some(event) = kernel.timers.peek() {
            if event.at != now {
                break;
            }
            let Some(event) = kernel.timers.pop() else {
                break;
            };
            event.fired.set(true);
            kernel.ready.push_back(event.task);
        }
        true
    }

    /// Shared kernel reference for triggers.
    pub(crate) fn kernel(&self) -> Weak<RefCell<Kernel>> {
        Rc::downgrade(&self.kernel)
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kernel = self.kernel.borrow();
        f.debug_struct("Scheduler")
            .field("now", &kernel.now)
            .field("tasks", &kernel.tasks.len())
            .field("timers", &kernel.timers.len())
            .finish()
    }
}
