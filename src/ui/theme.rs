//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme.
pub struct Theme;

impl Theme {
    // ── document ───────────────────────────────────────────────
    pub fn heading_style(level: u8) -> Style {
        let base = Style::default().add_modifier(Modifier::BOLD);
        match level {
            1 => base.fg(Color::Green),
            2 => base.fg(Color::Cyan),
            _ => base.fg(Color::Blue),
        }
    }

    pub fn text_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn code_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn link_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::UNDERLINED)
    }

    // ── contents pane ──────────────────────────────────────────
    pub fn toc_style() -> Style {
        Style::default().fg(Color::White)
    }

    /// The section currently at the top of the viewport.
    pub fn toc_current_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
