//! Easing curves: pluggable maps from linear progress to eased progress.
//!
//! Every curve takes progress already clamped to `[0, 1]` and must satisfy
//! `ease(0) == 0` and `ease(1) == 1`.

use std::fmt;
use std::str::FromStr;

/// Strategy used by the animator to shape linear progress.
///
/// Any `Fn(f64) -> f64` is an easing, so ad hoc curves can be passed as
/// closures without a wrapper type.
pub trait Easing {
    fn ease(&self, progress: f64) -> f64;
}

impl<F> Easing for F
where
    F: Fn(f64) -> f64,
{
    fn ease(&self, progress: f64) -> f64 {
        self(progress)
    }
}

/// Accelerate over the first half, decelerate over the second.
pub fn ease_in_out_quad(p: f64) -> f64 {
    if p < 0.5 {
        2.0 * p * p
    } else {
        -1.0 + (4.0 - 2.0 * p) * p
    }
}

// ───────────────────────────────────────── built-in curves ───

/// The curves selectable from config and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingKind {
    #[default]
    EaseInOutQuad,
    Linear,
    EaseOutCubic,
    Smoothstep,
}

impl EasingKind {
    /// Ordered list of all curves (used for cycling).
    pub const ALL: &[EasingKind] = &[
        EasingKind::EaseInOutQuad,
        EasingKind::Linear,
        EasingKind::EaseOutCubic,
        EasingKind::Smoothstep,
    ];

    /// Name used in the config file and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            EasingKind::EaseInOutQuad => "ease-in-out-quad",
            EasingKind::Linear => "linear",
            EasingKind::EaseOutCubic => "ease-out-cubic",
            EasingKind::Smoothstep => "smoothstep",
        }
    }

    /// The curve after this one, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl Easing for EasingKind {
    fn ease(&self, p: f64) -> f64 {
        match self {
            EasingKind::EaseInOutQuad => ease_in_out_quad(p),
            EasingKind::Linear => p,
            EasingKind::EaseOutCubic => 1.0 - (1.0 - p).powi(3),
            EasingKind::Smoothstep => p * p * (3.0 - 2.0 * p),
        }
    }
}

impl fmt::Display for EasingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown easing curve `{0}` (expected one of: ease-in-out-quad, linear, ease-out-cubic, smoothstep)")]
pub struct ParseEasingError(pub String);

impl FromStr for EasingKind {
    type Err = ParseEasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| ParseEasingError(s.to_string()))
    }
}
