use thiserror::Error;

/// Errors reported by a toolkit adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolkitError {
    /// The underlying native handle no longer exists (window closed).
    #[error("widget handle destroyed")]
    WidgetDestroyed,

    /// Any other adapter-level failure.
    #[error("toolkit backend error: {0}")]
    Backend(String),
}
