//! A terminal document viewer that scrolls smoothly between anchors.
//!
//! Run the binary with a markdown-like file (or nothing, for the built-in
//! guide) to open the viewer.  Run with `--dump-frames '#anchor'` to print the
//! frames of one scroll instead.

mod app;
mod config;
mod doc;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anchor_scroll::core::animator::OverlapPolicy;
use anchor_scroll::core::easing::EasingKind;
use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use tokio::time::MissedTickBehavior;

use crate::app::{
    dump,
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::doc::document::Document;
use crate::ui::{
    document_widget::DocumentWidget, indicator::ScrollIndicator, layout::AppLayout,
    theme::Theme, toc_widget::TocWidget,
};

/// How long the event reader waits for input before sending a `Tick`.
const IDLE_TICK: Duration = Duration::from_millis(250);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Smooth-scrolling document viewer")]
struct Cli {
    /// Document to open (defaults to the built-in guide).
    path: Option<PathBuf>,

    /// Scroll duration in milliseconds (0 jumps).
    #[arg(long)]
    duration: Option<u64>,

    /// Easing curve: ease-in-out-quad, linear, ease-out-cubic, smoothstep.
    #[arg(long)]
    easing: Option<EasingKind>,

    /// What a new scroll does to one in flight: supersede, reject, concurrent.
    #[arg(long)]
    overlap: Option<OverlapPolicy>,

    /// Print the frames of one scroll to SELECTOR (e.g. `#keys`) and exit.
    #[arg(long, value_name = "SELECTOR")]
    dump_frames: Option<String>,

    /// Viewport height in lines for `--dump-frames`.
    #[arg(long, default_value_t = 24)]
    viewport_height: usize,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let mut user_config = config::AppConfig::load();
    if let Some(ms) = cli.duration {
        user_config.duration_ms = ms;
    }
    if let Some(easing) = cli.easing {
        user_config.easing = easing;
    }
    if let Some(overlap) = cli.overlap {
        user_config.overlap = overlap;
    }

    let document = match &cli.path {
        Some(path) => Document::load(path)?,
        None => Document::sample(),
    };

    // ── headless mode ─────────────────────────────────────────
    if let Some(selector) = &cli.dump_frames {
        let mut stdout = io::stdout().lock();
        return dump::dump_frames(document, &user_config, selector, cli.viewport_height, &mut stdout);
    }

    let frame_interval = Duration::from_millis(user_config.frame_ms);
    let mut state = AppState::new(document, user_config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── async sources ─────────────────────────────────────────
    let mut events = spawn_event_reader(IDLE_TICK);
    let mut frame_timer = tokio::time::interval(frame_interval);
    frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // ── event loop ────────────────────────────────────────────
    loop {
        // Frame callbacks run right before the redraw they feed.
        state.run_frames();
        state.tick = state.tick.wrapping_add(1);

        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());
            state.layout = Some(layout);
            state
                .viewport
                .set_height(layout.doc_area.height.saturating_sub(2) as usize);

            let top_line = state.viewport.top_line();
            let current = state.doc.section_at(top_line);

            let toc_block = Block::default()
                .title(" Contents ")
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            frame.render_stateful_widget(
                TocWidget::new(&state.doc).current(current).block(toc_block),
                layout.toc_area,
                &mut state.toc,
            );

            let doc_block = Block::default()
                .title(format!(" {} ", state.doc.title))
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            frame.render_widget(
                DocumentWidget::new(&state.doc, top_line).block(doc_block),
                layout.doc_area,
            );
            frame.render_widget(
                ScrollIndicator {
                    visible: state.is_animating(),
                    tick: state.tick,
                    percent: state.viewport.percent(),
                    easing: state.config.easing.name(),
                },
                layout.doc_area,
            );

            let hint = state.config.status_bar_hint();
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(_, _) | AppEvent::Tick => {}
                }
            }

            _ = frame_timer.tick(), if state.is_animating() => {}

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
