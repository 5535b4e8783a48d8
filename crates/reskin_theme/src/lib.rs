//! Palette model and transition math for live theme switching.
//!
//! A [`Palette`] is a fixed-shape record of semantic color roles. Each
//! scalar slot is a [`PaletteValue`]: a concrete color or the
//! system-default sentinel, which is substituted through a toolkit-default
//! lookup before any interpolation. The progress-bar pair may additionally
//! be the "compute" sentinel, derived from the button/input/background
//! roles on demand.
//!
//! [`PaletteTransition`] captures an immutable old/new palette snapshot for
//! one transition and resolves any [`RoleKey`] to the blended color at the
//! current progress. [`ThemeTable`] maps theme names to palettes and loads
//! from TOML.

mod palette;
mod presets;
mod table;
mod transition;

pub use palette::{Palette, PaletteValue, ProgressPair, RoleKey, COMPUTE, SYSTEM_DEFAULT};
pub use presets::{builtin_table, ThemePreset};
pub use table::{ThemeLoadError, ThemeTable};
pub use transition::{toggle_indicator, PaletteTransition};
