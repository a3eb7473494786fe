//! Frame-driven smooth scrolling.
//!
//! The [`core`] module holds the whole animation engine: easing curves, the
//! per-run frame math, the driver that reschedules itself once per host tick,
//! and the `smooth_scroll_to` entry operation built on top of it.  The host
//! (a terminal viewer in this package's binary) only supplies the scheduler,
//! clock, value applier, target resolver and position reader.

pub mod core;
