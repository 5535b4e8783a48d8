//! Per-transition palette snapshot and role resolution.

use reskin_color::{blend, clamp01, Color, Hsl, Interpolation};

use crate::{Palette, PaletteValue, RoleKey};

/// Immutable old/new palette snapshot plus the current progress of one
/// transition.
///
/// Created per restyle invocation and discarded on completion; all state
/// lives on the caller's stack, so a transition triggered from inside a
/// redraw callback cannot corrupt an in-flight one.
#[derive(Clone, Debug)]
pub struct PaletteTransition {
    old: Palette,
    new: Palette,
    progress: f32,
    mode: Interpolation,
}

impl PaletteTransition {
    /// Snapshot both palettes (progress pairs made explicit so the
    /// computation rule applies identically to both sides) at the given
    /// progress.
    pub fn new(old: &Palette, new: &Palette, progress: f32, mode: Interpolation) -> Self {
        Self {
            old: old.normalized(),
            new: new.normalized(),
            progress,
            mode,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress;
    }

    pub fn mode(&self) -> Interpolation {
        self.mode
    }

    pub fn old_palette(&self) -> &Palette {
        &self.old
    }

    pub fn new_palette(&self) -> &Palette {
        &self.new
    }

    /// Resolve a role to the blended color at the current progress.
    ///
    /// `default_lookup` supplies the toolkit-native default for the
    /// attribute being themed; it is consulted for each side that carries
    /// the system-default sentinel and never parsed as a literal color.
    pub fn resolve<E>(
        &self,
        key: RoleKey,
        mut default_lookup: impl FnMut() -> Result<Color, E>,
    ) -> Result<Color, E> {
        let old = side(self.old.role(key), &mut default_lookup)?;
        let new = side(self.new.role(key), &mut default_lookup)?;
        Ok(blend(old, new, self.progress, self.mode))
    }

    /// Resolve the old side of a role without blending.
    ///
    /// This is what the old theme would nominally have set, used by the
    /// honor-previous comparison.
    pub fn resolve_old<E>(
        &self,
        key: RoleKey,
        mut default_lookup: impl FnMut() -> Result<Color, E>,
    ) -> Result<Color, E> {
        side(self.old.role(key), &mut default_lookup)
    }
}

fn side<E>(
    value: PaletteValue,
    default_lookup: &mut impl FnMut() -> Result<Color, E>,
) -> Result<Color, E> {
    match value {
        PaletteValue::Color(c) => Ok(c),
        PaletteValue::SystemDefault => default_lookup(),
    }
}

/// Derive the toggle indicator color of checkboxes and radio buttons.
///
/// Not a palette slot: the background lightness is shifted by one tenth of
/// the lightness gap between text and background, toward more contrast
/// with the text (lighter when the text is darker than the background,
/// darker otherwise). Both inputs are quantized through hex first so the
/// result matches the serialized form of the colors it was derived from.
pub fn toggle_indicator(background: Color, text: Color) -> Color {
    let bg = background.quantized().hsl();
    let tx = text.quantized().hsl();
    let delta = (tx.l - bg.l).abs() / 10.0 * if tx.l < bg.l { 1.0 } else { -1.0 };
    Color::from_hsl(Hsl {
        h: bg.h,
        s: bg.s,
        l: clamp01(bg.l + delta),
    })
}
