//! `smooth_scroll_to`: the public entry point tying resolution, measurement
//! and the animator together.

use super::animator::{Animator, StartOutcome};
use super::host::Millis;
use super::run::OnComplete;
use super::target::{PositionReader, TargetResolver};

/// Duration used when the caller gives none (or zero).
pub const DEFAULT_DURATION_MS: Millis = 500.0;

/// Smoothly scrolls a viewport to resolved targets.
pub struct SmoothScroller<R, P> {
    resolver: R,
    reader: P,
    animator: Animator,
    default_duration: Millis,
}

impl<R, P> SmoothScroller<R, P>
where
    R: TargetResolver,
    P: PositionReader<R::Target>,
{
    pub fn new(resolver: R, reader: P, animator: Animator) -> Self {
        Self {
            resolver,
            reader,
            animator,
            default_duration: DEFAULT_DURATION_MS,
        }
    }

    /// Duration used for omitted or falsy durations.  Non-positive values
    /// fall back to [`DEFAULT_DURATION_MS`].
    pub fn with_default_duration(mut self, duration: Millis) -> Self {
        self.default_duration = if duration > 0.0 {
            duration
        } else {
            DEFAULT_DURATION_MS
        };
        self
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn reader(&self) -> &P {
        &self.reader
    }

    /// Resolve `source` and scroll to it.  Resolution failures are logged
    /// and turn the call into a no-op.
    pub fn scroll_to(
        &self,
        source: &str,
        duration: Option<Millis>,
        on_complete: Option<OnComplete>,
    ) -> StartOutcome {
        let target = match self.resolver.resolve(source) {
            Ok(target) => Some(target),
            Err(err) => {
                tracing::debug!(source, %err, "scroll target did not resolve");
                None
            }
        };
        self.smooth_scroll_to(target.as_ref(), duration, on_complete)
    }

    /// Scroll to an already resolved target.  `None` is a no-op.
    pub fn smooth_scroll_to(
        &self,
        target: Option<&R::Target>,
        duration: Option<Millis>,
        on_complete: Option<OnComplete>,
    ) -> StartOutcome {
        let Some(target) = target else {
            return StartOutcome::NoTarget;
        };

        let current = self.reader.scroll_offset().round();
        let destination = self.reader.offset_in_viewport(target).round() + current;
        let duration = self.effective_duration(duration);

        tracing::debug!(current, destination, duration, "smooth scroll");
        self.animator
            .start(current, Some(destination), duration, on_complete)
    }

    /// Omitted, zero and NaN durations mean "use the default".  Negative
    /// durations pass through and complete immediately.
    fn effective_duration(&self, duration: Option<Millis>) -> Millis {
        match duration {
            Some(d) if d != 0.0 && !d.is_nan() => d,
            _ => self.default_duration,
        }
    }
}
