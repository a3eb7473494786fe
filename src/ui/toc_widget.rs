//! Contents pane: the document's headings as a selectable, indented list.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, StatefulWidget, Widget},
};

use crate::doc::document::Document;

use super::theme::Theme;

// ───────────────────────────────────────── state ─────────────

/// Persistent state for the contents pane (selected row, scroll offset).
#[derive(Debug, Default)]
pub struct TocState {
    /// Index of the highlighted section.
    pub selected: usize,
    /// First visible row.
    pub offset: usize,
}

impl TocState {
    pub fn select_next(&mut self, max: usize) {
        if max > 0 && self.selected < max - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Ensure the selected row is visible within `height` rows.
    pub fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected - height + 1;
        }
    }
}

// ───────────────────────────────────────── widget ────────────

/// The contents widget: created fresh each frame.
pub struct TocWidget<'a> {
    doc: &'a Document,
    /// Section at the top of the viewport, highlighted as "you are here".
    current: Option<usize>,
    block: Option<Block<'a>>,
}

impl<'a> TocWidget<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            current: None,
            block: None,
        }
    }

    pub fn current(mut self, current: Option<usize>) -> Self {
        self.current = current;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl StatefulWidget for TocWidget<'_> {
    type State = TocState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut TocState) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        state.clamp_scroll(inner.height as usize);

        let rows = self
            .doc
            .sections()
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(inner.height as usize);

        for (row, (idx, section)) in rows.enumerate() {
            let y = inner.y + row as u16;
            let marker = if self.current == Some(idx) { "▸ " } else { "  " };
            let indent = "  ".repeat(section.level.saturating_sub(1) as usize);
            let style = if self.current == Some(idx) {
                Theme::toc_current_style()
            } else {
                Theme::toc_style()
            };

            if idx == state.selected {
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), Theme::selected_style());
            }
            let line = Line::from(vec![
                Span::styled(marker, style),
                Span::raw(indent),
                Span::styled(section.title.as_str(), style),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
