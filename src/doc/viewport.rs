//! The scrolling viewport over a document.

use std::cell::Cell;
use std::rc::Rc;

use anchor_scroll::core::host::ValueApplier;

/// Shared handle onto the viewport's scroll state.
///
/// Clones observe and mutate the same offset, so the animator's applier, the
/// position reader, the input handler and the renderer all agree.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Fractional line offset of the first visible row.
    offset: Rc<Cell<f64>>,
    /// Visible rows, updated on every draw.
    height: Rc<Cell<usize>>,
    content_len: usize,
}

impl Viewport {
    pub fn new(content_len: usize) -> Self {
        Self {
            offset: Rc::new(Cell::new(0.0)),
            height: Rc::new(Cell::new(0)),
            content_len,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset.get()
    }

    /// First visible line.
    pub fn top_line(&self) -> usize {
        self.offset.get().round().max(0.0) as usize
    }

    pub fn height(&self) -> usize {
        self.height.get()
    }

    /// Record the visible height and re-clamp the offset to it.
    pub fn set_height(&self, height: usize) {
        self.height.set(height);
        self.scroll_to(self.offset.get());
    }

    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> f64 {
        self.content_len.saturating_sub(self.height.get()) as f64
    }

    /// Set the offset, clamped to `[0, max_offset]`.
    pub fn scroll_to(&self, offset: f64) {
        let offset = if offset.is_nan() { 0.0 } else { offset };
        self.offset.set(offset.clamp(0.0, self.max_offset()));
    }

    pub fn scroll_by(&self, delta: f64) {
        self.scroll_to(self.offset.get() + delta);
    }

    /// Percentage of the scrollable range above the viewport.
    pub fn percent(&self) -> u16 {
        let max = self.max_offset();
        if max <= 0.0 {
            return 100;
        }
        ((self.offset.get() / max) * 100.0).round().clamp(0.0, 100.0) as u16
    }
}

impl ValueApplier for Viewport {
    fn apply(&self, value: f64) {
        self.scroll_to(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_clamped_to_content() {
        let vp = Viewport::new(100);
        vp.set_height(20);
        vp.apply(500.0);
        assert_eq!(vp.offset(), 80.0);
        vp.scroll_by(-1000.0);
        assert_eq!(vp.offset(), 0.0);
        assert_eq!(vp.percent(), 0);
    }

    #[test]
    fn clones_share_state_and_round_for_display() {
        let vp = Viewport::new(100);
        vp.set_height(10);
        let other = vp.clone();
        other.apply(12.6);
        assert_eq!(vp.top_line(), 13);
        assert_eq!(vp.percent(), 14);
    }

    #[test]
    fn shrinking_content_window_reclamps() {
        let vp = Viewport::new(30);
        vp.set_height(5);
        vp.apply(25.0);
        vp.set_height(10);
        assert_eq!(vp.offset(), 20.0);
    }

    #[test]
    fn short_documents_cannot_scroll() {
        let vp = Viewport::new(5);
        vp.set_height(10);
        vp.apply(3.0);
        assert_eq!(vp.offset(), 0.0);
        assert_eq!(vp.percent(), 100);
    }
}
