use reskin_color::InvalidColorError;
use reskin_toolkit::ToolkitError;
use thiserror::Error;

/// Errors surfaced by the transition engine.
#[derive(Error, Debug)]
pub enum ReskinError {
    /// The mutually exclusive include/exclude widget filters were both
    /// supplied.
    #[error("target and exempt widget filters cannot both be specified")]
    ConflictingFilters,

    /// The requested theme name is absent from the supplied table.
    #[error("theme `{0}` is not present in the theme table")]
    UnknownTheme(String),

    /// A palette or derived value could not be parsed as a color.
    #[error(transparent)]
    InvalidColor(#[from] InvalidColorError),

    /// The underlying widget or window handle died mid-operation.
    #[error("widget destroyed during restyle")]
    WidgetDestroyed,

    /// Any other adapter-level failure.
    #[error("toolkit backend error: {0}")]
    Toolkit(String),
}

impl From<ToolkitError> for ReskinError {
    fn from(err: ToolkitError) -> Self {
        match err {
            ToolkitError::WidgetDestroyed => Self::WidgetDestroyed,
            ToolkitError::Backend(msg) => Self::Toolkit(msg),
        }
    }
}
