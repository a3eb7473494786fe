//! End-to-end behaviour of the public animation API against a simulated
//! host: a `FrameQueue` drained at fixed steps of a `ManualClock`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anchor_scroll::core::animator::{Animator, StartOutcome};
use anchor_scroll::core::easing::{ease_in_out_quad, Easing, EasingKind};
use anchor_scroll::core::host::{Clock, FrameQueue, ManualClock, Millis};
use anchor_scroll::core::run::AnimationRun;
use anchor_scroll::core::scroll::SmoothScroller;
use anchor_scroll::core::target::{PositionReader, ResolutionFailure, TargetResolver};
use pretty_assertions::assert_eq;

struct Host {
    queue: FrameQueue,
    clock: ManualClock,
    applied: Rc<RefCell<Vec<(Millis, f64)>>>,
}

impl Host {
    fn new() -> Self {
        Self {
            queue: FrameQueue::new(),
            clock: ManualClock::new(0.0),
            applied: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn animator(&self) -> Animator {
        let (sink, clock) = (Rc::clone(&self.applied), self.clock.clone());
        Animator::new(
            Rc::new(self.queue.clone()),
            Rc::new(self.clock.clone()),
            Rc::new(move |v: f64| sink.borrow_mut().push((clock.now(), v))),
        )
    }

    /// Drain frames every `step` ms until nothing is scheduled.
    fn run(&self, step: Millis) -> usize {
        let mut ticks = 0;
        while !self.queue.is_empty() {
            let now = self.clock.advance(step);
            self.queue.run_pending(now);
            ticks += 1;
        }
        ticks
    }

    fn values(&self) -> Vec<f64> {
        self.applied.borrow().iter().map(|(_, v)| *v).collect()
    }
}

fn counter() -> (Rc<Cell<u32>>, Box<dyn FnOnce()>) {
    let count = Rc::new(Cell::new(0));
    let c = Rc::clone(&count);
    (count, Box::new(move || c.set(c.get() + 1)))
}

#[test]
fn example_scenario_from_zero_to_one_thousand() {
    let host = Host::new();
    let (fired, on_complete) = counter();
    host.animator().start(0.0, Some(1000.0), 500.0, Some(on_complete));

    host.run(250.0);
    assert_eq!(*host.applied.borrow(), vec![(250.0, 500.0), (500.0, 1000.0)]);
    assert_eq!(fired.get(), 1);
}

#[test]
fn reverse_direction_lands_on_target() {
    let host = Host::new();
    host.animator().start(1000.0, Some(200.0), 500.0, None);
    host.run(16.0);
    let values = host.values();
    assert_eq!(values.last(), Some(&200.0));
    assert!(values.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn every_curve_starts_near_start_and_ends_exactly_on_target() {
    for kind in EasingKind::ALL {
        let host = Host::new();
        host.animator()
            .with_easing(*kind)
            .start(10.0, Some(1010.0), 500.0, None);
        host.run(1.0);
        let values = host.values();
        assert!((values[0] - 10.0).abs() < 10.0, "{kind}: first {}", values[0]);
        assert_eq!(values.last(), Some(&1010.0), "{kind}");
    }
}

#[test]
fn custom_closure_curve_is_pluggable() {
    let host = Host::new();
    let cubic_in = |p: f64| p * p * p;
    assert_eq!((cubic_in.ease(0.0), cubic_in.ease(1.0)), (0.0, 1.0));
    host.animator()
        .with_easing(cubic_in)
        .start(0.0, Some(8.0), 100.0, None);
    host.run(50.0);
    assert_eq!(host.values(), vec![1.0, 8.0]);
}

#[test]
fn progress_is_monotonic_and_bounded_under_jitter() {
    let run = AnimationRun::new(0, 100.0, 300.0, 0.0, 1.0, Rc::new(ease_in_out_quad), None);
    // Irregular timestamps, including one before the start and one far late.
    let stamps = [99.0, 100.0, 130.5, 131.0, 250.0, 399.9, 400.0, 10_000.0];
    let progress: Vec<f64> = stamps.iter().map(|t| run.sample(*t).progress).collect();
    assert!(progress.windows(2).all(|w| w[1] >= w[0]));
    assert!(progress.iter().all(|p| (0.0..=1.0).contains(p)));
    assert_eq!(run.sample(99.0).elapsed, 0.0);
}

#[test]
fn completion_fires_once_on_the_first_frame_past_duration() {
    let host = Host::new();
    let (fired, on_complete) = counter();
    let seen_at_completion = Rc::new(Cell::new(0));
    let (applied, seen) = (Rc::clone(&host.applied), Rc::clone(&seen_at_completion));
    host.animator().start(
        0.0,
        Some(1.0),
        100.0,
        Some(Box::new(move || {
            seen.set(applied.borrow().len());
            on_complete();
        })),
    );

    // Ticks at 30, 60, 90, 120: the fourth is the first with elapsed >= 100.
    assert_eq!(host.run(30.0), 4);
    assert_eq!(fired.get(), 1);
    assert_eq!(seen_at_completion.get(), 4);
}

#[test]
fn degenerate_duration_applies_once_and_schedules_nothing() {
    let host = Host::new();
    let (fired, on_complete) = counter();
    let outcome = host.animator().start(5.0, Some(50.0), 0.0, Some(on_complete));
    assert!(matches!(outcome, StartOutcome::Completed(_)));
    assert_eq!(host.values(), vec![50.0]);
    assert_eq!(fired.get(), 1);
    assert_eq!(host.run(16.0), 0);
}

// ───────────────────────────────────────── entry operation ───

struct Anchors;

impl TargetResolver for Anchors {
    type Target = f64;

    fn resolve(&self, source: &str) -> Result<f64, ResolutionFailure> {
        match source {
            "#far" => Ok(4000.0),
            "#(" => Err(ResolutionFailure::Malformed(source.into())),
            _ => Err(ResolutionFailure::NotFound(source.into())),
        }
    }
}

struct Page(Rc<Cell<f64>>);

impl PositionReader<f64> for Page {
    fn offset_in_viewport(&self, target: &f64) -> f64 {
        target - self.0.get()
    }

    fn scroll_offset(&self) -> f64 {
        self.0.get()
    }
}

#[test]
fn unresolvable_targets_schedule_and_apply_nothing() {
    let host = Host::new();
    let scroller = SmoothScroller::new(Anchors, Page(Rc::new(Cell::new(0.0))), host.animator());
    for source in ["#(", "#nothing", ""] {
        assert_eq!(scroller.scroll_to(source, None, None), StartOutcome::NoTarget);
    }
    assert_eq!(host.run(16.0), 0);
    assert!(host.values().is_empty());
}

#[test]
fn entry_operation_uses_default_duration() {
    let host = Host::new();
    let scroll = Rc::new(Cell::new(250.0));
    let scroller = SmoothScroller::new(Anchors, Page(Rc::clone(&scroll)), host.animator());
    scroller.scroll_to("#far", None, None);
    assert_eq!(host.run(100.0), 5);
    assert_eq!(host.values().last(), Some(&4000.0));
}
