//! The document being viewed and its adapters onto the scroll core:
//! anchor resolution, position reading, and the viewport the animator moves.

pub mod anchor;
pub mod document;
pub mod viewport;
