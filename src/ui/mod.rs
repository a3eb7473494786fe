//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! Widgets read the document and the viewport; they never start or advance
//! animations.

pub mod document_widget;
pub mod indicator;
pub mod layout;
pub mod theme;
pub mod toc_widget;
