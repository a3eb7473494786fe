//! User configuration: animation settings, keybindings, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/anchor-scroll/config.toml` (default
//! `~/.config/anchor-scroll/config.toml`).  Parsing is lenient: unknown keys
//! and unparsable values keep their defaults.

use std::collections::HashMap;
use std::path::PathBuf;

use anchor_scroll::core::animator::OverlapPolicy;
use anchor_scroll::core::easing::EasingKind;
use anchor_scroll::core::scroll::DEFAULT_DURATION_MS;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SelectPrev,
    SelectNext,
    ScrollToSelected,
    ScrollTop,
    ScrollBottom,
    PageUp,
    PageDown,
    CycleEasing,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for serialisation).
    pub const ALL: &[Action] = &[
        Action::SelectPrev,
        Action::SelectNext,
        Action::ScrollToSelected,
        Action::ScrollTop,
        Action::ScrollBottom,
        Action::PageUp,
        Action::PageDown,
        Action::CycleEasing,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::SelectPrev => "select_prev",
            Action::SelectNext => "select_next",
            Action::ScrollToSelected => "scroll_to_selected",
            Action::ScrollTop => "scroll_top",
            Action::ScrollBottom => "scroll_bottom",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::CycleEasing => "cycle_easing",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    fn modifier_mask() -> KeyModifiers {
        KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = Self::modifier_mask();
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Short label for the status bar (e.g. `"↑"`, `"Ctrl+c"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    /// Config-file form (e.g. `"Up"`, `"Ctrl+c"`).
    fn to_config_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, pretty: bool) -> String {
        let mut s = String::new();
        for (flag, prefix) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(prefix);
            }
        }
        let name = match (self.code, pretty) {
            (KeyCode::Up, true) => "↑".to_string(),
            (KeyCode::Down, true) => "↓".to_string(),
            (KeyCode::PageUp, true) => "PgUp".to_string(),
            (KeyCode::PageDown, true) => "PgDn".to_string(),
            (KeyCode::Char(' '), _) => "Space".to_string(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (code, _) => format!("{code:?}"),
        };
        s.push_str(&name);
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.trim().to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let key = key_part.trim();
        let code = match key.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            lower if lower.starts_with('f') && lower.len() > 1 => KeyCode::F(lower[1..].parse().ok()?),
            _ if key.chars().count() == 1 => KeyCode::Char(key.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: animation settings and keybindings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Scroll duration in milliseconds.  Zero jumps immediately.
    pub duration_ms: u64,
    pub easing: EasingKind,
    pub overlap: OverlapPolicy,
    /// Frame timer interval while a scroll is in flight.
    pub frame_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            duration_ms: DEFAULT_DURATION_MS as u64,
            easing: EasingKind::default(),
            overlap: OverlapPolicy::default(),
            frame_ms: 16,
        }
    }
}

impl AppConfig {
    /// Built-in keybindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Action::SelectPrev, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(Action::SelectNext, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::ScrollToSelected, vec![KeyBind::new(Enter, n), KeyBind::new(Char('l'), n)]);
        m.insert(Action::ScrollTop, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Action::ScrollBottom, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), KeyModifiers::SHIFT)]);
        m.insert(Action::PageUp, vec![KeyBind::new(PageUp, n), KeyBind::new(Char('b'), n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(Action::CycleEasing, vec![KeyBind::new(Char('e'), n)]);
        m.insert(Action::Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Duration handed to the scroller.  A zero setting jumps, which the
    /// scroller spells as a negative duration.
    pub fn scroll_duration(&self) -> f64 {
        if self.duration_ms == 0 {
            -1.0
        } else {
            self.duration_ms as f64
        }
    }

    /// Find the action that matches a key event.  When several bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<(Action, u32)> = None;
        for (&action, binds) in &self.bindings {
            for bind in binds.iter().filter(|b| b.matches(event)) {
                let mc = bind.modifiers.bits().count_ones();
                if best.map_or(true, |(_, best_mc)| mc > best_mc) {
                    best = Some((action, mc));
                }
            }
        }
        best.map(|(action, _)| action)
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: contents | {}: go | {}: easing ({}) | {}: quit",
            self.short_binding(Action::SelectPrev),
            self.short_binding(Action::SelectNext),
            self.short_binding(Action::ScrollToSelected),
            self.short_binding(Action::CycleEasing),
            self.easing,
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "no config file, using defaults");
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "duration_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.duration_ms = v.min(10_000);
                    }
                    continue;
                }
                "frame_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.frame_ms = v.clamp(4, 250);
                    }
                    continue;
                }
                "easing" => {
                    match value.parse() {
                        Ok(kind) => config.easing = kind,
                        Err(err) => tracing::warn!(%err, "ignoring easing setting"),
                    }
                    continue;
                }
                "overlap" => {
                    match value.parse() {
                        Ok(policy) => config.overlap = policy,
                        Err(err) => tracing::warn!(%err, "ignoring overlap setting"),
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };
            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# anchor-scroll configuration".to_string(),
            String::new(),
            "# Animation".to_string(),
            format!("duration_ms = {}", self.duration_ms),
            format!("easing = {}", self.easing),
            format!("overlap = {}", self.overlap),
            format!("frame_ms = {}", self.frame_ms),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/anchor-scroll/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("anchor-scroll").join("config.toml")
}
