//! Host collaborators: the frame scheduler, clock, and value applier the
//! animator drives, plus the concrete implementations this package ships.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

/// Timestamps in milliseconds on an opaque monotonic clock.
pub type Millis = f64;

/// A continuation invoked once with the tick timestamp.
pub type FrameCallback = Box<dyn FnOnce(Millis)>;

// ───────────────────────────────────────── traits ────────────

/// Invokes each registered callback exactly once, on a later tick.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback);
}

/// Monotonic time source used to stamp the start of a run.
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Receives every interpolated value (e.g. writes a scroll offset).
pub trait ValueApplier {
    fn apply(&self, value: f64);
}

impl<F> ValueApplier for F
where
    F: Fn(f64),
{
    fn apply(&self, value: f64) {
        self(value)
    }
}

// ───────────────────────────────────────── frame queue ───────

/// FIFO frame scheduler drained explicitly by the host loop.
///
/// Clones share one queue.  [`FrameQueue::run_pending`] only runs callbacks
/// that were queued before the call; anything queued while draining waits
/// for the next tick.
#[derive(Clone, Default)]
pub struct FrameQueue {
    pending: Rc<RefCell<VecDeque<FrameCallback>>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one tick's worth of callbacks.  Returns how many ran.
    pub fn run_pending(&self, now: Millis) -> usize {
        let batch = std::mem::take(&mut *self.pending.borrow_mut());
        let count = batch.len();
        for callback in batch {
            callback(now);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&self, callback: FrameCallback) {
        self.pending.borrow_mut().push_back(callback);
    }
}

// ───────────────────────────────────────── clocks ────────────

/// Milliseconds elapsed since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Millis {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A clock that only moves when told to.  Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Millis) -> Millis {
        let now = self.now.get() + by;
        self.now.set(now);
        now
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}
