//! Anchor resolution and measurement against the viewport.

use std::rc::Rc;

use anchor_scroll::core::target::{PositionReader, ResolutionFailure, TargetResolver};

use super::document::Document;
use super::viewport::Viewport;

/// A place in the document the viewport can scroll to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Top,
    Section(usize),
    Line(usize),
    Bottom,
}

/// Identifier syntax accepted after `#`: letters, digits, `-` and `_`, not
/// starting with a digit or with `-` followed by a digit.
pub fn is_valid_id(id: &str) -> bool {
    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if first.is_ascii_digit() {
        return false;
    }
    if first == '-' {
        match chars.next() {
            None => return false,
            Some(c) if c.is_ascii_digit() => return false,
            _ => {}
        }
    }
    id.chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

// ───────────────────────────────────────── resolver ──────────

/// Resolves `href` values from links against the document's headings.
pub struct DocumentResolver {
    doc: Rc<Document>,
}

impl DocumentResolver {
    pub fn new(doc: Rc<Document>) -> Self {
        Self { doc }
    }
}

impl TargetResolver for DocumentResolver {
    type Target = Anchor;

    fn resolve(&self, source: &str) -> Result<Anchor, ResolutionFailure> {
        let Some(id) = source.trim().strip_prefix('#') else {
            return Err(ResolutionFailure::NotFragment(source.to_string()));
        };
        if id.is_empty() {
            return Ok(Anchor::Top);
        }
        if !is_valid_id(id) {
            return Err(ResolutionFailure::Malformed(source.to_string()));
        }
        self.doc
            .section_by_id(id)
            .map(Anchor::Section)
            .ok_or_else(|| ResolutionFailure::NotFound(source.to_string()))
    }
}

// ───────────────────────────────────────── reader ────────────

/// Measures anchors in lines relative to the viewport's current offset.
pub struct ViewportReader {
    doc: Rc<Document>,
    viewport: Viewport,
}

impl ViewportReader {
    pub fn new(doc: Rc<Document>, viewport: Viewport) -> Self {
        Self { doc, viewport }
    }

    fn absolute_line(&self, anchor: &Anchor) -> f64 {
        match *anchor {
            Anchor::Top => 0.0,
            Anchor::Section(idx) => self.doc.section(idx).map_or(0.0, |s| s.line as f64),
            Anchor::Line(line) => line as f64,
            Anchor::Bottom => self.viewport.max_offset(),
        }
    }
}

impl PositionReader<Anchor> for ViewportReader {
    fn offset_in_viewport(&self, target: &Anchor) -> f64 {
        self.absolute_line(target) - self.viewport.offset()
    }

    fn scroll_offset(&self) -> f64 {
        self.viewport.offset()
    }
}
