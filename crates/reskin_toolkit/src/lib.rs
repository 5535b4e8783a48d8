//! Toolkit abstraction for live widget restyling.
//!
//! The theme engine never talks to a concrete widget toolkit. It addresses
//! windows, widgets, row frames, and menus through opaque handles and the
//! [`Toolkit`] trait, which a host adapter implements over the real GUI
//! library. Widgets declare a closed [`WidgetKind`] plus capability markers
//! ([`WidgetInfo`]) instead of being classified by class-name strings, so a
//! toolkit renaming its internals cannot silently break dispatch.
//!
//! Ownership stays with the toolkit: the engine only reads capabilities and
//! mutates theme-relevant attributes. Any operation on a dead handle
//! reports [`ToolkitError::WidgetDestroyed`], which the engine treats as a
//! transition-aborting (but expected) condition.

mod attr;
mod error;
mod kind;
mod toolkit;

pub use attr::{Attr, StyleState};
pub use error::ToolkitError;
pub use kind::WidgetKind;
pub use toolkit::{FrameId, MenuId, Toolkit, WidgetId, WidgetInfo, WindowId};

/// Result alias for toolkit operations.
pub type Result<T> = std::result::Result<T, ToolkitError>;
