//! One animation run and the per-frame progress math.

use std::fmt;
use std::rc::Rc;

use super::easing::Easing;
use super::host::Millis;

/// Identifies a run within one animator.
pub type RunId = u64;

/// Callback fired once when a run reaches its target.
pub type OnComplete = Box<dyn FnOnce()>;

/// Everything a run needs, fixed when it starts.
///
/// The run travels by value through each scheduled frame callback; nothing
/// about it is shared with other runs.
pub struct AnimationRun {
    pub(crate) id: RunId,
    start_time: Millis,
    duration: Millis,
    start_value: f64,
    target_value: f64,
    easing: Rc<dyn Easing>,
    on_complete: Option<OnComplete>,
}

/// What one frame of a run computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    /// Time since the run started, never negative.
    pub elapsed: Millis,
    /// Linear progress in `[0, 1]`.
    pub progress: f64,
    /// Progress after easing.
    pub eased: f64,
    /// The value to apply this frame.
    pub value: f64,
    /// `true` once `elapsed >= duration`; the run must not reschedule.
    pub done: bool,
}

impl AnimationRun {
    pub fn new(
        id: RunId,
        start_time: Millis,
        duration: Millis,
        start_value: f64,
        target_value: f64,
        easing: Rc<dyn Easing>,
        on_complete: Option<OnComplete>,
    ) -> Self {
        Self {
            id,
            start_time,
            duration,
            start_value,
            target_value,
            easing,
            on_complete,
        }
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn start_time(&self) -> Millis {
        self.start_time
    }

    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    pub fn target_value(&self) -> f64 {
        self.target_value
    }

    /// Zero, negative, NaN and infinite durations complete without any
    /// eased frame.
    pub fn is_degenerate(&self) -> bool {
        !(self.duration > 0.0 && self.duration.is_finite())
    }

    /// Compute the frame for scheduler timestamp `now`.
    pub fn sample(&self, now: Millis) -> FrameSample {
        // The first tick's timestamp can precede the captured start time.
        let elapsed = (now - self.start_time).max(0.0);

        if self.is_degenerate() {
            return FrameSample {
                elapsed,
                progress: 1.0,
                eased: 1.0,
                value: self.target_value,
                done: true,
            };
        }

        let progress = (elapsed / self.duration).min(1.0);
        let eased = self.easing.ease(progress);
        let done = !(elapsed < self.duration);

        // Land exactly on the target whatever rounding the curve introduced.
        let value = if done {
            self.target_value
        } else {
            let length = self.target_value - self.start_value;
            self.start_value + length * eased
        };

        FrameSample {
            elapsed,
            progress,
            eased,
            value,
            done,
        }
    }

    /// Take the completion callback.  Yields `Some` at most once.
    pub(crate) fn take_on_complete(&mut self) -> Option<OnComplete> {
        self.on_complete.take()
    }
}

impl fmt::Debug for AnimationRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRun")
            .field("id", &self.id)
            .field("start_time", &self.start_time)
            .field("duration", &self.duration)
            .field("start_value", &self.start_value)
            .field("target_value", &self.target_value)
            .field("has_on_complete", &self.on_complete.is_some())
            .finish()
    }
}
