//! Color model and interpolation for live theme transitions.
//!
//! This crate provides:
//! - [`Color`]: normalized RGB color with HSL conversion and hex/named parsing
//! - [`Hsl`]: hue/saturation/lightness form, all channels in `[0, 1]`
//! - [`blend`]: progress-based interpolation between two colors across three
//!   color-space strategies ([`Interpolation`])
//!
//! The interpolation endpoints are exact: progress 0 returns the start color
//! and progress 1 returns the end color with no floating point drift, so an
//! animation that forces a final full-progress frame always lands precisely
//! on the target palette.

mod color;
mod interpolate;
mod named;

pub use color::{clamp01, Color, Hsl, InvalidColorError};
pub use interpolate::{blend, Interpolation};
