//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! The viewport offset is the one exception: it is shared with the animator,
//! which writes it from frame callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use anchor_scroll::core::animator::{Animator, StartOutcome};
use anchor_scroll::core::host::{Clock, FrameQueue, MonotonicClock};
use anchor_scroll::core::scroll::SmoothScroller;

use crate::config::AppConfig;
use crate::doc::anchor::{Anchor, DocumentResolver, ViewportReader};
use crate::doc::document::Document;
use crate::doc::viewport::Viewport;
use crate::ui::layout::AppLayout;
use crate::ui::toc_widget::TocState;

pub type Scroller = SmoothScroller<DocumentResolver, ViewportReader>;

/// Top-level application state.
pub struct AppState {
    pub doc: Rc<Document>,
    pub viewport: Viewport,
    /// Pending frame callbacks, drained once per redraw.
    pub frames: FrameQueue,
    pub clock: MonotonicClock,
    pub scroller: Scroller,
    /// Contents pane selection and scroll.
    pub toc: TocState,
    pub config: AppConfig,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Arrival notices posted by completion callbacks.
    arrivals: Rc<RefCell<Option<String>>>,
    /// Where things were drawn last frame, for mouse hit-testing.
    pub layout: Option<AppLayout>,
    /// Monotonically increasing redraw counter (drives the indicator).
    pub tick: u64,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(doc: Document, config: AppConfig) -> Self {
        let doc = Rc::new(doc);
        let viewport = Viewport::new(doc.line_count());
        let frames = FrameQueue::new();
        let clock = MonotonicClock::new();

        let animator = Animator::new(
            Rc::new(frames.clone()),
            Rc::new(clock),
            Rc::new(viewport.clone()),
        )
        .with_easing(config.easing)
        .with_policy(config.overlap);

        let scroller = SmoothScroller::new(
            DocumentResolver::new(Rc::clone(&doc)),
            ViewportReader::new(Rc::clone(&doc), viewport.clone()),
            animator,
        )
        .with_default_duration(config.duration_ms as f64);

        Self {
            doc,
            viewport,
            frames,
            clock,
            scroller,
            toc: TocState::default(),
            config,
            status_message: None,
            arrivals: Rc::new(RefCell::new(None)),
            layout: None,
            tick: 0,
            should_quit: false,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.scroller.animator().is_animating()
    }

    /// Advance every in-flight run by one frame.  Call right before drawing.
    pub fn run_frames(&mut self) -> usize {
        let ran = self.frames.run_pending(self.clock.now());
        if let Some(notice) = self.arrivals.borrow_mut().take() {
            self.status_message = Some(notice);
        }
        ran
    }

    fn arrival_notice(&self, label: String) -> Box<dyn FnOnce()> {
        let slot = Rc::clone(&self.arrivals);
        Box::new(move || {
            *slot.borrow_mut() = Some(format!("Arrived at {label}"));
        })
    }

    /// Smoothly scroll to a known anchor.
    pub fn scroll_to_anchor(&mut self, anchor: Anchor) {
        let label = match anchor {
            Anchor::Top => "top".to_string(),
            Anchor::Bottom => "bottom".to_string(),
            Anchor::Line(line) => format!("line {}", line + 1),
            Anchor::Section(idx) => self
                .doc
                .section(idx)
                .map_or_else(|| "section".to_string(), |s| format!("#{}", s.id)),
        };
        let on_complete = self.arrival_notice(label);
        let duration = self.config.scroll_duration();
        let outcome = self
            .scroller
            .smooth_scroll_to(Some(&anchor), Some(duration), Some(on_complete));
        self.report(outcome, None);
    }

    /// Follow a link `href`.  Unresolvable links only update the status bar.
    pub fn follow_link(&mut self, href: &str) {
        let on_complete = self.arrival_notice(href.to_string());
        let outcome = self
            .scroller
            .scroll_to(href, Some(self.config.scroll_duration()), Some(on_complete));
        self.report(outcome, Some(href));
    }

    fn report(&mut self, outcome: StartOutcome, href: Option<&str>) {
        match outcome {
            StartOutcome::Started(_) => self.status_message = None,
            StartOutcome::Completed(_) => {
                if let Some(notice) = self.arrivals.borrow_mut().take() {
                    self.status_message = Some(notice);
                }
            }
            StartOutcome::NoTarget => {
                self.status_message =
                    Some(format!("No target for {}", href.unwrap_or("that link")));
            }
            StartOutcome::Rejected => {
                self.status_message = Some("Still scrolling (overlap = reject)".to_string());
            }
        }
    }

    /// Switch to the next easing curve and persist the choice.
    pub fn cycle_easing(&mut self) {
        self.config.easing = self.config.easing.next();
        self.scroller.animator().set_easing(self.config.easing);
        if let Err(err) = self.config.save() {
            tracing::warn!(%err, "failed to save config");
        }
        self.status_message = Some(format!("Easing: {}", self.config.easing));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state(duration_ms: u64) -> AppState {
        let config = AppConfig {
            duration_ms,
            ..AppConfig::default()
        };
        let mut state = AppState::new(Document::sample(), config);
        state.viewport.set_height(20);
        state
    }

    #[test]
    fn zero_duration_jumps_and_reports_arrival() {
        let mut s = state(0);
        s.follow_link("#keys");
        let keys = s.doc.section_by_id("keys").and_then(|i| s.doc.section(i)).map(|x| x.line);
        assert_eq!(Some(s.viewport.top_line()), keys);
        assert_eq!(s.status_message.as_deref(), Some("Arrived at #keys"));
        assert!(!s.is_animating());
    }

    #[test]
    fn broken_links_only_touch_the_status_bar() {
        let mut s = state(500);
        for href in ["#missing-heading", "#bad id", "#9lives", "https://example.com"] {
            s.follow_link(href);
            assert_eq!(s.status_message, Some(format!("No target for {href}")));
        }
        assert!(s.frames.is_empty());
        assert_eq!(s.viewport.offset(), 0.0);
    }

    #[test]
    fn animated_scroll_starts_and_queues_a_frame() {
        let mut s = state(500);
        s.scroll_to_anchor(Anchor::Bottom);
        assert!(s.is_animating());
        assert_eq!(s.frames.len(), 1);
        assert_eq!(s.status_message, None);
    }

    #[test]
    fn easing_cycles() {
        let mut s = state(500);
        let before = s.config.easing;
        // Point the config at a scratch directory so saving is harmless.
        std::env::set_var("XDG_CONFIG_HOME", std::env::temp_dir().join("anchor-scroll-test"));
        s.cycle_easing();
        assert_eq!(s.config.easing, before.next());
        assert_eq!(s.status_message, Some(format!("Easing: {}", before.next())));
    }
}
