//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::config::Action;
use crate::doc::anchor::Anchor;
use crate::ui::document_widget::link_at_cell;

use super::state::AppState;

/// Lines moved per mouse-wheel notch.
const WHEEL_STEP: f64 = 3.0;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    let sections = state.doc.sections().len();
    match action {
        Action::Quit => state.should_quit = true,
        Action::SelectPrev => state.toc.select_prev(),
        Action::SelectNext => state.toc.select_next(sections),
        Action::ScrollToSelected => {
            if state.toc.selected < sections {
                state.scroll_to_anchor(Anchor::Section(state.toc.selected));
            }
        }
        Action::ScrollTop => state.scroll_to_anchor(Anchor::Top),
        Action::ScrollBottom => state.scroll_to_anchor(Anchor::Bottom),
        Action::PageUp => {
            let page = state.viewport.height().saturating_sub(1).max(1);
            let line = state.viewport.top_line().saturating_sub(page);
            state.scroll_to_anchor(Anchor::Line(line));
        }
        Action::PageDown => {
            let page = state.viewport.height().saturating_sub(1).max(1);
            let line = state.viewport.top_line() + page;
            state.scroll_to_anchor(Anchor::Line(line));
        }
        Action::CycleEasing => state.cycle_easing(),
    }
}

/// Process a mouse event: clicks on the contents pane or on links, and the
/// wheel over the document.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let Some(layout) = state.layout else {
        return;
    };

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            if contains(layout.doc_area, mouse.column, mouse.row) {
                state.viewport.scroll_by(WHEEL_STEP);
            }
        }
        MouseEventKind::ScrollUp => {
            if contains(layout.doc_area, mouse.column, mouse.row) {
                state.viewport.scroll_by(-WHEEL_STEP);
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((_, row)) = inner_cell(layout.toc_area, mouse.column, mouse.row) {
                let idx = state.toc.offset + row;
                if idx < state.doc.sections().len() {
                    state.toc.selected = idx;
                    state.scroll_to_anchor(Anchor::Section(idx));
                }
            } else if let Some((col, row)) = inner_cell(layout.doc_area, mouse.column, mouse.row) {
                let line_idx = state.viewport.top_line() + row;
                let href = state
                    .doc
                    .lines()
                    .get(line_idx)
                    .and_then(|line| link_at_cell(line, col))
                    .map(|link| link.href.clone());
                if let Some(href) = href {
                    state.follow_link(&href);
                }
            }
        }
        _ => {}
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

/// Position of `(x, y)` inside a bordered block, if it lands within the
/// border.
fn inner_cell(area: Rect, x: u16, y: u16) -> Option<(usize, usize)> {
    if area.width < 2 || area.height < 2 {
        return None;
    }
    let inner = Rect::new(area.x + 1, area.y + 1, area.width - 2, area.height - 2);
    contains(inner, x, y).then(|| ((x - inner.x) as usize, (y - inner.y) as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::doc::document::Document;
    use crate::ui::layout::AppLayout;
    use crossterm::event::KeyEventKind;
    use pretty_assertions::assert_eq;

    fn state() -> AppState {
        let mut state = AppState::new(Document::sample(), AppConfig::default());
        let layout = AppLayout::from_area(Rect::new(0, 0, 100, 30));
        state.viewport.set_height(layout.doc_area.height.saturating_sub(2) as usize);
        state.layout = Some(layout);
        state
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn keys_move_selection_and_start_scrolls() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Down));
        handle_key(&mut s, press(KeyCode::Down));
        assert_eq!(s.toc.selected, 2);
        handle_key(&mut s, press(KeyCode::Enter));
        assert!(s.is_animating());
        handle_key(&mut s, press(KeyCode::Char('q')));
        assert!(s.should_quit);
    }

    #[test]
    fn wheel_scrolls_directly() {
        let mut s = state();
        let doc = s.layout.map(|l| l.doc_area).unwrap_or_default();
        handle_mouse(
            &mut s,
            MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: doc.x + 2,
                row: doc.y + 2,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(s.viewport.offset(), WHEEL_STEP);
        assert!(!s.is_animating());
    }

    #[test]
    fn clicking_a_contents_row_scrolls_to_it() {
        let mut s = state();
        let toc = s.layout.map(|l| l.toc_area).unwrap_or_default();
        handle_mouse(&mut s, click(toc.x + 1, toc.y + 1 + 3));
        assert_eq!(s.toc.selected, 3);
        assert!(s.is_animating());
    }

    #[test]
    fn clicking_a_link_follows_it() {
        let mut s = state();
        let doc = s.layout.map(|l| l.doc_area).unwrap_or_default();
        // Find the first visible line carrying a link.
        let (row, link) = s
            .doc
            .lines()
            .iter()
            .enumerate()
            .find_map(|(i, l)| l.links.first().map(|link| (i, link.clone())))
            .unwrap_or_else(|| panic!("sample has links"));
        handle_mouse(&mut s, click(doc.x + 1 + link.start as u16, doc.y + 1 + row as u16));
        assert!(s.is_animating());
        assert_eq!(s.status_message, None);
    }

    #[test]
    fn link_clicks_are_measured_in_cells() {
        let doc = Document::parse("t", "日本 [link](#x)\n# X\n");
        let mut s = AppState::new(doc, AppConfig::default());
        let layout = AppLayout::from_area(Rect::new(0, 0, 100, 30));
        s.viewport.set_height(1);
        s.layout = Some(layout);
        let area = layout.doc_area;
        // Cell 3 is the second half of the second glyph, not the link.
        handle_mouse(&mut s, click(area.x + 1 + 3, area.y + 1));
        assert!(!s.is_animating());
        handle_mouse(&mut s, click(area.x + 1 + 5, area.y + 1));
        assert!(s.is_animating());
    }

    #[test]
    fn clicks_on_borders_are_ignored() {
        let mut s = state();
        let toc = s.layout.map(|l| l.toc_area).unwrap_or_default();
        handle_mouse(&mut s, click(toc.x, toc.y));
        assert!(!s.is_animating());
        assert_eq!(s.toc.selected, 0);
    }
}
