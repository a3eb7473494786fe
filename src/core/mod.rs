//! Core algorithms: easing, frame progression, and the scroll entry point.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Hosts plug in through the traits in [`host`] and [`target`].

pub mod animator;
pub mod easing;
pub mod host;
pub mod run;
pub mod scroll;
pub mod target;
