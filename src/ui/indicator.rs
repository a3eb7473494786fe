//! In-flight indicator: a small spinner and label rendered in the top-right
//! corner of a given area while a scroll animation is running.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each redraw.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A "scrolling…" badge with the current position and easing curve.
///
/// Render this on top of the document pane's border.  It picks its own
/// position (top-right of `area`) and is invisible when `visible` is false.
pub struct ScrollIndicator<'a> {
    pub visible: bool,
    /// Redraw counter (drives the spinner frame).
    pub tick: u64,
    /// Percentage of the document above the viewport.
    pub percent: u16,
    pub easing: &'a str,
}

impl Widget for ScrollIndicator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.height == 0 {
            return;
        }

        let frame = SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()];
        let label = format!(" {frame} {:>3}% {} ", self.percent, self.easing);

        let label_width = label.chars().count() as u16;
        if area.width < label_width + 4 {
            return;
        }
        // Top-right, inside the border (leave 1 col for the border char).
        let x = area.x + area.width - label_width - 2;

        let line = Line::from(Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

        buf.set_line(x, area.y, &line, label_width);
    }
}
