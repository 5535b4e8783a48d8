//! Theme-name → palette lookup table with TOML loading.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::Palette;

/// A theme table failed to parse.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct ThemeLoadError(#[from] toml::de::Error);

/// Palette lookup table keyed by theme name.
#[derive(Clone, Debug, Default)]
pub struct ThemeTable {
    themes: FxHashMap<String, Palette>,
}

impl ThemeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from TOML, one `[theme-name]` section per theme.
    pub fn from_toml_str(s: &str) -> Result<Self, ThemeLoadError> {
        let themes: FxHashMap<String, Palette> = toml::from_str(s)?;
        tracing::debug!(themes = themes.len(), "loaded theme table");
        Ok(Self { themes })
    }

    pub fn insert(&mut self, name: impl Into<String>, palette: Palette) {
        self.themes.insert(name.into(), palette);
    }

    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.themes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// All theme names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of themes free of system-default sentinels, sorted.
    ///
    /// These are safe to apply in environments where no toolkit-default
    /// lookup is available.
    pub fn safe_themes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .themes
            .iter()
            .filter(|(_, palette)| !palette.uses_system_defaults())
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PaletteValue, ProgressPair};

    const TABLE: &str = r##"
[dark-blue]
background = "#1a2835"
text = "#d1ecff"
input = "#335267"
text-input = "#acc2d0"
scroll = "#335267"
button = ["#d1ecff", "#33507d"]
progress = "compute"

[system-native]
background = "system-default"
text = "system-default"
input = "system-default"
text-input = "system-default"
scroll = "system-default"
button = ["system-default", "system-default"]

[parchment]
background = "antique white"
text = "#3b2f2f"
input = "#fdf5e6"
text-input = "#3b2f2f"
scroll = "#d8c9a7"
button = ["#fdf5e6", "#8b5a2b"]
progress = ["#8b5a2b", "#fdf5e6"]
"##;

    #[test]
    fn loads_themes_from_toml() {
        let table = ThemeTable::from_toml_str(TABLE).unwrap();
        assert_eq!(table.len(), 3);
        let dark = table.get("dark-blue").unwrap();
        assert_eq!(
            String::from(dark.background),
            "#1a2835".to_owned()
        );
        assert_eq!(dark.progress, ProgressPair::Compute);

        let parchment = table.get("parchment").unwrap();
        // Named colors parse too.
        assert_eq!(String::from(parchment.background), "#faebd7");
        assert!(matches!(parchment.progress, ProgressPair::Explicit(_, _)));
    }

    #[test]
    fn missing_progress_defaults_to_compute() {
        let table = ThemeTable::from_toml_str(TABLE).unwrap();
        let native = table.get("system-native").unwrap();
        assert_eq!(native.progress, ProgressPair::Compute);
        assert!(native.background.is_system_default());
    }

    #[test]
    fn bad_colors_are_load_errors() {
        let bad = r##"
[broken]
background = "#zzzzzz"
text = "#d1ecff"
input = "#335267"
text-input = "#acc2d0"
scroll = "#335267"
button = ["#d1ecff", "#33507d"]
"##;
        assert!(ThemeTable::from_toml_str(bad).is_err());
    }

    #[test]
    fn safe_themes_excludes_sentinel_palettes() {
        let table = ThemeTable::from_toml_str(TABLE).unwrap();
        assert_eq!(table.safe_themes(), vec!["dark-blue", "parchment"]);
        assert_eq!(
            table.names(),
            vec!["dark-blue", "parchment", "system-native"]
        );
    }

    #[test]
    fn sentinel_slots_survive_the_round_trip() {
        let table = ThemeTable::from_toml_str(TABLE).unwrap();
        let native = table.get("system-native").unwrap();
        assert_eq!(native.button.0, PaletteValue::SystemDefault);
    }
}
