//! Live theme-transition engine for desktop widget toolkits.
//!
//! Retrofits theme switching onto already-instantiated windows: no window
//! re-creation, no widget ownership. Given an old and a new palette, the
//! engine walks the live widget tree through a host [`Toolkit`] adapter,
//! computes per-widget-kind target attributes, and either applies them
//! instantly or animates the transition with time-based color
//! interpolation.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use reskin_engine::{Reskinner, ReskinOptions, Interpolation};
//! use reskin_theme::builtin_table;
//! use std::time::Duration;
//!
//! let table = builtin_table();
//! let mut reskinner = Reskinner::new();
//!
//! // Instant switch:
//! reskinner.reskin(&mut toolkit, window, "dark-blue", &table, &ReskinOptions::default())?;
//!
//! // Animated switch:
//! reskinner.animated_reskin(
//!     &mut toolkit,
//!     window,
//!     "light-gray",
//!     &table,
//!     Duration::from_millis(450),
//!     Interpolation::HslShortest,
//!     &ReskinOptions::default(),
//! )?;
//! ```
//!
//! # Model
//!
//! - Single-threaded and cooperative: everything runs on the toolkit's own
//!   event thread; the animation loop polls the wall clock synchronously.
//! - Session state (palette snapshots, progress, honor verdicts) lives on
//!   the call stack, so a transition triggered from inside a redraw
//!   callback cannot corrupt an in-flight one.
//! - A window closing mid-animation surfaces as a widget-destroyed error
//!   from the adapter and simply ends the animation; during an instant
//!   reskin the same error propagates to the caller.

mod dispatch;
mod driver;
mod easing;
mod error;
mod honor;
mod options;

pub use driver::{Reskinner, WindowTheme, DEFAULT_ANIMATED_DURATION};
pub use easing::Easing;
pub use error::ReskinError;
pub use options::ReskinOptions;

// Re-export the vocabulary types callers need alongside the driver.
pub use reskin_color::{Color, Interpolation};
pub use reskin_theme::{Palette, PaletteValue, RoleKey, ThemeTable};
pub use reskin_toolkit::{Toolkit, WidgetKind, WindowId};
