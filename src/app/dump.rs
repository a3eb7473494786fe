//! Headless frame dump: runs one smooth scroll against a simulated 60 Hz
//! scheduler and prints every applied frame.

use std::cell::{Cell, RefCell};
use std::io::Write;
use std::rc::Rc;

use anchor_scroll::core::animator::Animator;
use anchor_scroll::core::host::{FrameQueue, ManualClock};
use anchor_scroll::core::run::FrameSample;
use anchor_scroll::core::scroll::SmoothScroller;
use anchor_scroll::core::target::TargetResolver;

use crate::config::AppConfig;
use crate::doc::anchor::{DocumentResolver, ViewportReader};
use crate::doc::document::Document;
use crate::doc::viewport::Viewport;

const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after this many simulated frames (about five minutes).
const MAX_FRAMES: usize = 18_000;

/// One observed frame: the run's endpoints and what it computed.
struct Observed {
    from: f64,
    to: f64,
    frame: FrameSample,
}

/// Scroll `doc` to `selector` and write one line per frame to `out`.
pub fn dump_frames(
    doc: Document,
    config: &AppConfig,
    selector: &str,
    viewport_height: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let out: &mut dyn Write = out;
    let doc = Rc::new(doc);
    let viewport = Viewport::new(doc.line_count());
    viewport.set_height(viewport_height);

    let queue = FrameQueue::new();
    let clock = ManualClock::new(0.0);
    let observed = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&observed);
    let animator = Animator::new(
        Rc::new(queue.clone()),
        Rc::new(clock.clone()),
        Rc::new(viewport.clone()),
    )
    .with_easing(config.easing)
    .with_frame_observer(move |run, frame| {
        sink.borrow_mut().push(Observed {
            from: run.start_value(),
            to: run.target_value(),
            frame: *frame,
        });
    });

    let scroller = SmoothScroller::new(
        DocumentResolver::new(Rc::clone(&doc)),
        ViewportReader::new(Rc::clone(&doc), viewport.clone()),
        animator,
    );

    let target = match scroller.resolver().resolve(selector) {
        Ok(target) => target,
        Err(err) => {
            writeln!(out, "no target: {err}")?;
            return Ok(());
        }
    };

    let arrived = Rc::new(Cell::new(false));
    let flag = Rc::clone(&arrived);
    let outcome = scroller.smooth_scroll_to(
        Some(&target),
        Some(config.scroll_duration()),
        Some(Box::new(move || flag.set(true))),
    );
    tracing::debug!(?outcome, "dump started");

    let mut frames = 0;
    let mut write_frames = |out: &mut dyn Write| -> anyhow::Result<()> {
        for Observed { from, to, frame } in observed.borrow_mut().drain(..) {
            if frames == 0 {
                writeln!(
                    out,
                    "scroll to {selector}: line {from} -> {to} over {}ms ({}, 60 Hz)",
                    config.duration_ms, config.easing
                )?;
            }
            frames += 1;
            writeln!(
                out,
                "t={:>8.1}ms progress={:.3} eased={:.3} value={:.2}",
                frame.elapsed, frame.progress, frame.eased, frame.value
            )?;
        }
        Ok(())
    };

    write_frames(&mut *out)?;
    let mut ticks = 0;
    while !queue.is_empty() && ticks < MAX_FRAMES {
        ticks += 1;
        let now = ticks as f64 * FRAME_MS;
        clock.set(now);
        queue.run_pending(now);
        write_frames(&mut *out)?;
    }

    if arrived.get() {
        writeln!(out, "arrived after {frames} frame(s) at line {}", viewport.top_line())?;
    } else {
        writeln!(out, "gave up after {ticks} frames")?;
    }
    Ok(())
}
