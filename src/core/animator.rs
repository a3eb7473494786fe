//! The animation driver: starts runs and steps them once per scheduler tick.
//!
//! A run is moved into the closure handed to the [`FrameScheduler`]; each
//! frame either moves it into the next closure or drops it after firing the
//! completion callback.  The only state kept on the animator itself is the
//! bookkeeping needed to apply the [`OverlapPolicy`].

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use super::easing::{Easing, EasingKind};
use super::host::{Clock, FrameScheduler, Millis, ValueApplier};
use super::run::{AnimationRun, FrameSample, OnComplete, RunId};

// ───────────────────────────────────────── policy ────────────

/// What happens when a run is started while another is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// The new run cancels the old one.  The old run stops at its next frame
    /// without applying a value or firing its completion.
    #[default]
    Supersede,
    /// The new run is refused while one is in flight.
    Reject,
    /// Both runs proceed and both apply values.
    Concurrent,
}

impl OverlapPolicy {
    pub const ALL: &[OverlapPolicy] = &[
        OverlapPolicy::Supersede,
        OverlapPolicy::Reject,
        OverlapPolicy::Concurrent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OverlapPolicy::Supersede => "supersede",
            OverlapPolicy::Reject => "reject",
            OverlapPolicy::Concurrent => "concurrent",
        }
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown overlap policy `{0}` (expected supersede, reject or concurrent)")]
pub struct ParseOverlapError(pub String);

impl FromStr for OverlapPolicy {
    type Err = ParseOverlapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| ParseOverlapError(s.to_string()))
    }
}

/// Result of [`Animator::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The first frame has been requested.
    Started(RunId),
    /// Degenerate duration: the target was applied and completion fired
    /// synchronously; nothing was scheduled.
    Completed(RunId),
    /// No target was given; nothing happened.
    NoTarget,
    /// Another run is in flight and the policy is [`OverlapPolicy::Reject`].
    Rejected,
}

// ───────────────────────────────────────── animator ──────────

/// Sees every frame a run computes, right before its value is applied.
pub type FrameObserver = Rc<dyn Fn(&AnimationRun, &FrameSample)>;

struct Shared {
    scheduler: Rc<dyn FrameScheduler>,
    clock: Rc<dyn Clock>,
    applier: Rc<dyn ValueApplier>,
    easing: RefCell<Rc<dyn Easing>>,
    observer: RefCell<Option<FrameObserver>>,
    policy: Cell<OverlapPolicy>,
    next_id: Cell<RunId>,
    /// Most recently started run; older runs yield to it under `Supersede`.
    latest: Cell<Option<RunId>>,
    /// Runs that still have a frame scheduled.
    in_flight: Cell<usize>,
}

impl Shared {
    fn observe(&self, run: &AnimationRun, frame: &FrameSample) {
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(run, frame);
        }
    }
}

/// Drives value animations over a host's frame scheduler.
///
/// Cloning is cheap and yields a handle onto the same animator.
#[derive(Clone)]
pub struct Animator {
    shared: Rc<Shared>,
}

impl Animator {
    pub fn new(
        scheduler: Rc<dyn FrameScheduler>,
        clock: Rc<dyn Clock>,
        applier: Rc<dyn ValueApplier>,
    ) -> Self {
        Self {
            shared: Rc::new(Shared {
                scheduler,
                clock,
                applier,
                easing: RefCell::new(Rc::new(EasingKind::default())),
                observer: RefCell::new(None),
                policy: Cell::new(OverlapPolicy::default()),
                next_id: Cell::new(0),
                latest: Cell::new(None),
                in_flight: Cell::new(0),
            }),
        }
    }

    pub fn with_easing(self, easing: impl Easing + 'static) -> Self {
        self.set_easing(easing);
        self
    }

    pub fn with_frame_observer(self, observer: impl Fn(&AnimationRun, &FrameSample) + 'static) -> Self {
        *self.shared.observer.borrow_mut() = Some(Rc::new(observer));
        self
    }

    pub fn with_policy(self, policy: OverlapPolicy) -> Self {
        self.set_policy(policy);
        self
    }

    /// Replace the curve used by runs started from now on.
    pub fn set_easing(&self, easing: impl Easing + 'static) {
        *self.shared.easing.borrow_mut() = Rc::new(easing);
    }

    pub fn set_policy(&self, policy: OverlapPolicy) {
        self.shared.policy.set(policy);
    }

    /// `true` while at least one run still has a frame scheduled.
    pub fn is_animating(&self) -> bool {
        self.shared.in_flight.get() > 0
    }

    /// Start animating from `start_value` to `target_value` over `duration`
    /// milliseconds.  A missing target is a no-op.
    pub fn start(
        &self,
        start_value: f64,
        target_value: Option<f64>,
        duration: Millis,
        on_complete: Option<OnComplete>,
    ) -> StartOutcome {
        let Some(target_value) = target_value else {
            tracing::debug!("animation start ignored: no target");
            return StartOutcome::NoTarget;
        };

        let shared = &self.shared;
        if shared.policy.get() == OverlapPolicy::Reject && self.is_animating() {
            tracing::debug!(target_value, "animation start rejected: run in flight");
            return StartOutcome::Rejected;
        }

        let id = shared.next_id.get();
        shared.next_id.set(id.wrapping_add(1));
        if let Some(prev) = shared.latest.replace(Some(id)) {
            if shared.policy.get() == OverlapPolicy::Supersede && self.is_animating() {
                tracing::debug!(prev, id, "superseding in-flight run");
            }
        }

        let easing = Rc::clone(&*shared.easing.borrow());
        let mut run = AnimationRun::new(
            id,
            shared.clock.now(),
            duration,
            start_value,
            target_value,
            easing,
            on_complete,
        );
        tracing::debug!(?run, "animation start");

        if run.is_degenerate() {
            let frame = run.sample(run.start_time());
            shared.observe(&run, &frame);
            shared.applier.apply(frame.value);
            if let Some(done) = run.take_on_complete() {
                done();
            }
            return StartOutcome::Completed(id);
        }

        shared.in_flight.set(shared.in_flight.get() + 1);
        schedule(Rc::clone(shared), run);
        StartOutcome::Started(id)
    }
}

fn schedule(shared: Rc<Shared>, run: AnimationRun) {
    let scheduler = Rc::clone(&shared.scheduler);
    scheduler.request_frame(Box::new(move |now| process_frame(shared, run, now)));
}

fn process_frame(shared: Rc<Shared>, mut run: AnimationRun, now: Millis) {
    if shared.policy.get() == OverlapPolicy::Supersede && shared.latest.get() != Some(run.id()) {
        tracing::debug!(id = run.id(), "run superseded, stopping");
        shared.in_flight.set(shared.in_flight.get().saturating_sub(1));
        return;
    }

    let frame = run.sample(now);
    tracing::trace!(
        id = run.id(),
        elapsed = frame.elapsed,
        progress = frame.progress,
        value = frame.value,
        "frame"
    );
    shared.observe(&run, &frame);
    shared.applier.apply(frame.value);

    if !frame.done {
        schedule(shared, run);
        return;
    }

    shared.in_flight.set(shared.in_flight.get().saturating_sub(1));
    tracing::debug!(id = run.id(), elapsed = frame.elapsed, "run complete");
    if let Some(done) = run.take_on_complete() {
        done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::{FrameQueue, ManualClock};
    use pretty_assertions::assert_eq;

    struct Harness {
        queue: FrameQueue,
        clock: ManualClock,
        applied: Rc<RefCell<Vec<f64>>>,
        animator: Animator,
    }

    fn harness() -> Harness {
        let queue = FrameQueue::new();
        let clock = ManualClock::new(1_000.0);
        let applied = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&applied);
        let animator = Animator::new(
            Rc::new(queue.clone()),
            Rc::new(clock.clone()),
            Rc::new(move |v: f64| sink.borrow_mut().push(v)),
        );
        Harness {
            queue,
            clock,
            applied,
            animator,
        }
    }

    impl Harness {
        fn tick(&self, dt: Millis) -> usize {
            let now = self.clock.advance(dt);
            self.queue.run_pending(now)
        }

        fn counter() -> (Rc<Cell<u32>>, OnComplete) {
            let count = Rc::new(Cell::new(0));
            let c = Rc::clone(&count);
            (count, Box::new(move || c.set(c.get() + 1)))
        }
    }

    #[test]
    fn runs_to_target_then_completes_once() {
        let h = harness();
        let (fired, on_complete) = Harness::counter();
        let outcome = h.animator.start(0.0, Some(1000.0), 500.0, Some(on_complete));
        assert_eq!(outcome, StartOutcome::Started(0));
        assert!(h.animator.is_animating());

        assert_eq!(h.tick(250.0), 1);
        assert_eq!(*h.applied.borrow(), vec![500.0]);
        assert_eq!(fired.get(), 0);

        assert_eq!(h.tick(250.0), 1);
        assert_eq!(*h.applied.borrow(), vec![500.0, 1000.0]);
        assert_eq!(fired.get(), 1);
        assert!(!h.animator.is_animating());

        assert_eq!(h.tick(16.0), 0);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn missing_target_is_a_no_op() {
        let h = harness();
        assert_eq!(h.animator.start(0.0, None, 500.0, None), StartOutcome::NoTarget);
        assert!(h.queue.is_empty());
        assert!(h.applied.borrow().is_empty());
        assert!(!h.animator.is_animating());
    }

    #[test]
    fn zero_duration_applies_target_once_without_scheduling() {
        let h = harness();
        let (fired, on_complete) = Harness::counter();
        let outcome = h.animator.start(10.0, Some(90.0), 0.0, Some(on_complete));
        assert_eq!(outcome, StartOutcome::Completed(0));
        assert_eq!(*h.applied.borrow(), vec![90.0]);
        assert_eq!(fired.get(), 1);
        assert!(h.queue.is_empty());
        assert!(!h.animator.is_animating());
    }

    #[test]
    fn infinite_duration_jumps_instead_of_running_forever() {
        let h = harness();
        let (fired, on_complete) = Harness::counter();
        let outcome = h.animator.start(0.0, Some(50.0), f64::INFINITY, Some(on_complete));
        assert_eq!(outcome, StartOutcome::Completed(0));
        assert_eq!(*h.applied.borrow(), vec![50.0]);
        assert_eq!(fired.get(), 1);
        assert!(h.queue.is_empty());
    }

    #[test]
    fn observer_sees_each_sample_before_it_is_applied() {
        let h = harness();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (sink, applied) = (Rc::clone(&seen), Rc::clone(&h.applied));
        let animator = h.animator.clone().with_frame_observer(move |run, frame| {
            assert_eq!(run.target_value(), 100.0);
            sink.borrow_mut().push((frame.progress, frame.value, applied.borrow().len()));
        });
        animator.start(0.0, Some(100.0), 100.0, None);
        h.tick(50.0);
        h.tick(50.0);
        assert_eq!(*seen.borrow(), vec![(0.5, 50.0, 0), (1.0, 100.0, 1)]);
    }

    #[test]
    fn first_tick_before_start_time_applies_start_value() {
        let h = harness();
        h.animator.start(40.0, Some(400.0), 500.0, None);
        h.queue.run_pending(990.0);
        assert_eq!(*h.applied.borrow(), vec![40.0]);
        assert!(h.animator.is_animating());
    }

    #[test]
    fn supersede_stops_the_older_run_silently() {
        let h = harness();
        let (first_done, first_cb) = Harness::counter();
        let (second_done, second_cb) = Harness::counter();

        h.animator.start(0.0, Some(100.0), 100.0, Some(first_cb));
        h.tick(50.0);
        h.animator.start(50.0, Some(-50.0), 100.0, Some(second_cb));

        while h.tick(25.0) > 0 {}

        assert_eq!(first_done.get(), 0);
        assert_eq!(second_done.get(), 1);
        assert_eq!(h.applied.borrow().last(), Some(&-50.0));
        assert!(h.applied.borrow()[1..].iter().all(|v| *v <= 50.0));
        assert!(!h.animator.is_animating());
    }

    #[test]
    fn reject_refuses_while_in_flight() {
        let h = harness();
        h.animator.set_policy(OverlapPolicy::Reject);
        assert_eq!(h.animator.start(0.0, Some(10.0), 100.0, None), StartOutcome::Started(0));
        assert_eq!(h.animator.start(0.0, Some(99.0), 100.0, None), StartOutcome::Rejected);

        while h.tick(50.0) > 0 {}
        assert_eq!(h.applied.borrow().last(), Some(&10.0));
        assert_eq!(h.animator.start(10.0, Some(99.0), 100.0, None), StartOutcome::Started(1));
    }

    #[test]
    fn concurrent_runs_both_complete() {
        let h = harness();
        h.animator.set_policy(OverlapPolicy::Concurrent);
        let (a, a_cb) = Harness::counter();
        let (b, b_cb) = Harness::counter();
        h.animator.start(0.0, Some(100.0), 100.0, Some(a_cb));
        h.animator.start(0.0, Some(200.0), 200.0, Some(b_cb));

        while h.tick(50.0) > 0 {}
        assert_eq!((a.get(), b.get()), (1, 1));
        assert_eq!(h.applied.borrow().last(), Some(&200.0));
    }

    #[test]
    fn easing_is_captured_at_start() {
        let h = harness();
        h.animator.start(0.0, Some(100.0), 100.0, None);
        h.animator.set_easing(EasingKind::Linear);
        h.tick(25.0);
        // Default quad curve: 2 * 0.25^2 = 0.125.
        assert_eq!(*h.applied.borrow(), vec![12.5]);
    }

    #[test]
    fn completion_may_start_a_new_run() {
        let h = harness();
        let animator = h.animator.clone();
        h.animator.start(
            0.0,
            Some(10.0),
            10.0,
            Some(Box::new(move || {
                animator.start(10.0, Some(20.0), 10.0, None);
            })),
        );
        while h.tick(10.0) > 0 {}
        assert_eq!(*h.applied.borrow(), vec![10.0, 20.0]);
        assert!(!h.animator.is_animating());
    }
}
