//! The transition driver: instant and animated theme application.

use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

use reskin_color::Interpolation;
use reskin_theme::{Palette, PaletteTransition, ThemeTable};
use reskin_toolkit::{Toolkit, WindowId};

use crate::dispatch::Dispatcher;
use crate::honor::HonorLedger;
use crate::options::{ReskinOptions, WidgetFilter};
use crate::ReskinError;

/// Default duration of an animated reskin.
pub const DEFAULT_ANIMATED_DURATION: Duration = Duration::from_millis(450);

/// The theme last applied to a window.
#[derive(Clone, Debug)]
pub struct WindowTheme {
    pub theme: String,
    pub palette: Palette,
}

/// Theming context for a set of windows.
///
/// Owns the window → (theme name, palette) association so the previous
/// theme can always be recovered; hosts keep one instance per application
/// (or per window group) instead of relying on process-global state.
/// Entries are written only after a transition completes and are simply
/// left behind when a window closes.
#[derive(Debug, Default)]
pub struct Reskinner {
    windows: FxHashMap<WindowId, WindowTheme>,
}

impl Reskinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The association entry for a window, if any transition has completed
    /// on it.
    pub fn window_theme(&self, window: WindowId) -> Option<&WindowTheme> {
        self.windows.get(&window)
    }

    /// Apply `new_theme` to the window instantaneously.
    ///
    /// Fails fast on conflicting filters or an unknown theme, before any
    /// widget is touched. Does nothing at all when both the theme name and
    /// the resolved palette already match the window's current ones. A
    /// widget destroyed mid-pass propagates as
    /// [`ReskinError::WidgetDestroyed`].
    pub fn reskin<T: Toolkit>(
        &mut self,
        tk: &mut T,
        window: WindowId,
        new_theme: &str,
        table: &ThemeTable,
        opts: &ReskinOptions,
    ) -> Result<(), ReskinError> {
        WidgetFilter::from_options(opts)?;
        let (old_theme, old_palette) = self.seed_entry(tk, window, table)?;
        let new_palette = lookup(table, new_theme)?;
        if old_theme == new_theme && old_palette == new_palette {
            tracing::debug!(theme = %new_theme, "reskin skipped, theme unchanged");
            return Ok(());
        }
        tracing::debug!(old = %old_theme, new = %new_theme, "reskin");

        let tr = PaletteTransition::new(&old_palette, &new_palette, 1.0, Interpolation::Rgb);
        let mut honors = HonorLedger::default();
        Dispatcher::new(tk, window, &tr, opts, &mut honors).run()?;

        self.commit(tk, window, new_theme, new_palette, opts);
        Ok(())
    }

    /// Animate the window from its current theme to `new_theme`.
    ///
    /// Runs a synchronous loop on the caller's thread: each pass recomputes
    /// progress from the wall clock and restyles the whole tree at the
    /// interpolated palette. Timer granularity never lands exactly on the
    /// end inside the loop, so one final pass at progress exactly 1 pins
    /// the target palette before the association is updated. Closing the
    /// window mid-animation ends the loop early without error.
    #[allow(clippy::too_many_arguments)]
    pub fn animated_reskin<T: Toolkit>(
        &mut self,
        tk: &mut T,
        window: WindowId,
        new_theme: &str,
        table: &ThemeTable,
        duration: Duration,
        mode: Interpolation,
        opts: &ReskinOptions,
    ) -> Result<(), ReskinError> {
        WidgetFilter::from_options(opts)?;
        let (old_theme, old_palette) = self.seed_entry(tk, window, table)?;
        let new_palette = lookup(table, new_theme)?;
        if old_theme == new_theme && old_palette == new_palette {
            tracing::debug!(theme = %new_theme, "animated reskin skipped, theme unchanged");
            return Ok(());
        }
        tracing::debug!(
            old = %old_theme,
            new = %new_theme,
            ?duration,
            ?mode,
            "animated reskin"
        );

        let mut tr = PaletteTransition::new(&old_palette, &new_palette, 0.0, mode);
        let mut honors = HonorLedger::default();
        let start = Instant::now();

        if !duration.is_zero() {
            while start.elapsed() <= duration {
                let raw = round4(start.elapsed().as_secs_f32() / duration.as_secs_f32());
                tr.set_progress(opts.easing.apply(raw));
                tracing::trace!(progress = raw, "transition frame");
                match Dispatcher::new(tk, window, &tr, opts, &mut honors).run() {
                    Ok(()) => {}
                    Err(ReskinError::WidgetDestroyed) => {
                        tracing::debug!("window closed mid-animation");
                        return Ok(());
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        tr.set_progress(1.0);
        match Dispatcher::new(tk, window, &tr, opts, &mut honors).run() {
            Ok(()) => {}
            Err(ReskinError::WidgetDestroyed) => return Ok(()),
            Err(err) => return Err(err),
        }

        self.commit(tk, window, new_theme, new_palette, opts);
        Ok(())
    }

    /// Flip whether the window background acts as a transparency key
    /// color. Works on reskinned and untouched windows alike.
    pub fn toggle_transparency<T: Toolkit>(
        &self,
        tk: &mut T,
        window: WindowId,
    ) -> Result<(), ReskinError> {
        let background = tk.window_background(window)?;
        let key = tk.window_transparency_key(window)?;
        let next = if key.is_some() { None } else { Some(background) };
        tk.window_set_transparency_key(window, next)?;
        Ok(())
    }

    /// Old theme for a transition: the stored association entry, or the
    /// toolkit's current theme for a window seen for the first time.
    fn seed_entry<T: Toolkit>(
        &self,
        tk: &T,
        window: WindowId,
        table: &ThemeTable,
    ) -> Result<(String, Palette), ReskinError> {
        if let Some(entry) = self.windows.get(&window) {
            return Ok((entry.theme.clone(), entry.palette.clone()));
        }
        let current = tk.current_theme();
        let palette = lookup(table, &current)?;
        Ok((current, palette))
    }

    fn commit<T: Toolkit>(
        &mut self,
        tk: &mut T,
        window: WindowId,
        new_theme: &str,
        palette: Palette,
        opts: &ReskinOptions,
    ) {
        self.windows.insert(
            window,
            WindowTheme {
                theme: new_theme.to_owned(),
                palette,
            },
        );
        if opts.set_future {
            tk.set_current_theme(new_theme);
        }
    }
}

fn lookup(table: &ThemeTable, name: &str) -> Result<Palette, ReskinError> {
    table
        .get(name)
        .cloned()
        .ok_or_else(|| ReskinError::UnknownTheme(name.to_owned()))
}

fn round4(x: f32) -> f32 {
    (x * 10_000.0).round() / 10_000.0
}
