//! Application orchestration: state, event loop plumbing, input handling,
//! and the headless frame dump.

pub mod dump;
pub mod event;
pub mod handler;
pub mod state;
