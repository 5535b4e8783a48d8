//! Built-in palette presets.
//!
//! A small starter catalog so hosts can demo transitions without shipping
//! their own table. Hosts with an existing theme catalog load it through
//! [`crate::ThemeTable::from_toml_str`] instead.

use reskin_color::Color;
use std::fmt::{Display, Formatter};

use crate::{Palette, PaletteValue, ProgressPair, ThemeTable};

/// Built-in preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    LightGray,
    DarkGray,
    DarkBlue,
    DarkTeal,
    /// Every slot deferred to the toolkit's native defaults.
    SystemNative,
}

impl ThemePreset {
    /// Stable preset id, used as the theme name in the built-in table.
    pub fn id(self) -> &'static str {
        match self {
            Self::LightGray => "light-gray",
            Self::DarkGray => "dark-gray",
            Self::DarkBlue => "dark-blue",
            Self::DarkTeal => "dark-teal",
            Self::SystemNative => "system-native",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 5] = [
            ThemePreset::LightGray,
            ThemePreset::DarkGray,
            ThemePreset::DarkBlue,
            ThemePreset::DarkTeal,
            ThemePreset::SystemNative,
        ];
        &PRESETS
    }

    /// Build this preset's palette.
    pub fn palette(self) -> Palette {
        match self {
            Self::LightGray => make(
                0xF2F2F2,
                0x000000,
                0xFFFFFF,
                0x000000,
                0xE3E3E3,
                (0x000000, 0xD8D8D8),
            ),
            Self::DarkGray => make(
                0x404040,
                0xFFFFFF,
                0x4D4D4D,
                0xFFFFFF,
                0x707070,
                (0xFFFFFF, 0x585858),
            ),
            Self::DarkBlue => make(
                0x1A2835,
                0xD1ECFF,
                0x335267,
                0xACC2D0,
                0x335267,
                (0xD1ECFF, 0x33507D),
            ),
            Self::DarkTeal => Palette {
                progress: ProgressPair::Explicit(
                    value(0x1B6D83),
                    value(0x18586A),
                ),
                ..make(
                    0x0F3B47,
                    0xD2F1F9,
                    0x18586A,
                    0xB8E4EE,
                    0x18586A,
                    (0xD2F1F9, 0x1B6D83),
                )
            },
            Self::SystemNative => Palette {
                background: PaletteValue::SystemDefault,
                text: PaletteValue::SystemDefault,
                input: PaletteValue::SystemDefault,
                text_input: PaletteValue::SystemDefault,
                scroll: PaletteValue::SystemDefault,
                button: (PaletteValue::SystemDefault, PaletteValue::SystemDefault),
                progress: ProgressPair::Compute,
            },
        }
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// The built-in table: every preset keyed by its id.
pub fn builtin_table() -> ThemeTable {
    let mut table = ThemeTable::new();
    for preset in ThemePreset::all() {
        table.insert(preset.id(), preset.palette());
    }
    table
}

fn value(hex: u32) -> PaletteValue {
    PaletteValue::Color(Color::from_hex(hex))
}

fn make(
    background: u32,
    text: u32,
    input: u32,
    text_input: u32,
    scroll: u32,
    button: (u32, u32),
) -> Palette {
    Palette {
        background: value(background),
        text: value(text),
        input: value(input),
        text_input: value(text_input),
        scroll: value(scroll),
        button: (value(button.0), value(button.1)),
        progress: ProgressPair::Compute,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_contains_every_preset() {
        let table = builtin_table();
        assert_eq!(table.len(), ThemePreset::all().len());
        for preset in ThemePreset::all() {
            assert!(table.contains(preset.id()), "{preset} missing");
        }
    }

    #[test]
    fn only_the_native_preset_uses_system_defaults() {
        let table = builtin_table();
        assert_eq!(
            table.safe_themes(),
            vec!["dark-blue", "dark-gray", "dark-teal", "light-gray"]
        );
    }
}
