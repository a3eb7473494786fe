//! Document pane: renders the visible slice of the document with headings
//! and links styled.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line as TextLine, Span},
    widgets::{Block, Widget},
};

use crate::doc::document::{Document, Line, LineKind, Link};

use super::theme::Theme;

/// The document widget: created fresh each frame from the viewport's
/// current (rounded) offset.
pub struct DocumentWidget<'a> {
    doc: &'a Document,
    top_line: usize,
    block: Option<Block<'a>>,
}

impl<'a> DocumentWidget<'a> {
    pub fn new(doc: &'a Document, top_line: usize) -> Self {
        Self {
            doc,
            top_line,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

/// The link drawn under terminal column `col` of a rendered line.  Wide
/// characters take two cells, so columns are measured by display width.
pub fn link_at_cell(line: &Line, col: usize) -> Option<&Link> {
    let mut width = 0;
    for (idx, c) in line.text.chars().enumerate() {
        width += Span::raw(c.to_string()).width();
        if col < width {
            return line.link_at(idx);
        }
    }
    None
}

/// Split a line into spans, styling link ranges over `base`.
fn styled_line(line: &Line) -> TextLine<'_> {
    let base = match line.kind {
        LineKind::Heading { level, .. } => Theme::heading_style(level),
        LineKind::Code => return TextLine::from(Span::styled(line.text.as_str(), Theme::code_style())),
        LineKind::Text => Theme::text_style(),
    };
    if line.links.is_empty() {
        return TextLine::from(Span::styled(line.text.as_str(), base));
    }

    let chars: Vec<char> = line.text.chars().collect();
    let segment = |from: usize, to: usize, style: Style| -> Span<'static> {
        Span::styled(chars[from..to].iter().collect::<String>(), style)
    };

    let mut spans = Vec::with_capacity(line.links.len() * 2 + 1);
    let mut pos = 0;
    for link in &line.links {
        if link.start > pos {
            spans.push(segment(pos, link.start, base));
        }
        spans.push(segment(link.start, link.end, base.patch(Theme::link_style())));
        pos = link.end;
    }
    if pos < chars.len() {
        spans.push(segment(pos, chars.len(), base));
    }
    TextLine::from(spans)
}

impl Widget for DocumentWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        let visible = self
            .doc
            .lines()
            .iter()
            .skip(self.top_line)
            .take(inner.height as usize);

        for (row, line) in visible.enumerate() {
            let y = inner.y + row as u16;
            buf.set_line(inner.x, y, &styled_line(line), inner.width);
        }
    }
}
