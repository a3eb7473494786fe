//! Target resolution and position reading: how a click source becomes an
//! absolute scroll destination.

/// Why a click source did not resolve to a target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionFailure {
    /// The source is not an in-document reference at all.
    #[error("`{0}` is not a fragment reference")]
    NotFragment(String),
    /// The reference is syntactically invalid.
    #[error("malformed selector `{0}`")]
    Malformed(String),
    /// The reference is valid but nothing matches it.
    #[error("no element matches `{0}`")]
    NotFound(String),
}

/// Turns an opaque click source into a target.
pub trait TargetResolver {
    type Target;

    fn resolve(&self, source: &str) -> Result<Self::Target, ResolutionFailure>;
}

/// Measures targets against the scrolling viewport.
pub trait PositionReader<T> {
    /// Offset of `target` relative to the top of the viewport.  Negative when
    /// the target lies above it.
    fn offset_in_viewport(&self, target: &T) -> f64;

    /// Current absolute scroll offset of the viewport.
    fn scroll_offset(&self) -> f64;
}
