//! The fixed-shape palette record and its role keys.

use reskin_color::{Color, InvalidColorError};
use serde::{Deserialize, Serialize};

/// Spelling of the system-default sentinel in serialized palettes.
pub const SYSTEM_DEFAULT: &str = "system-default";

/// Spelling of the computed progress-pair sentinel in serialized palettes.
pub const COMPUTE: &str = "compute";

/// One scalar palette slot: a concrete color, or "use the toolkit's native
/// default for this slot".
///
/// The sentinel is never a color itself; it must be substituted through a
/// toolkit-default lookup before interpolation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaletteValue {
    Color(Color),
    SystemDefault,
}

impl PaletteValue {
    /// Parse a serialized slot: the sentinel, a hex color, or a color name.
    pub fn parse(s: &str) -> Result<Self, InvalidColorError> {
        if s == SYSTEM_DEFAULT {
            Ok(Self::SystemDefault)
        } else {
            Color::parse(s).map(Self::Color)
        }
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(c),
            Self::SystemDefault => None,
        }
    }

    pub fn is_system_default(self) -> bool {
        matches!(self, Self::SystemDefault)
    }
}

impl From<Color> for PaletteValue {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl TryFrom<String> for PaletteValue {
    type Error = InvalidColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PaletteValue> for String {
    fn from(value: PaletteValue) -> Self {
        match value {
            PaletteValue::Color(c) => c.to_hex_string(),
            PaletteValue::SystemDefault => SYSTEM_DEFAULT.to_owned(),
        }
    }
}

/// The progress-bar role: an explicit (bar, trough) pair or the "compute
/// from the other roles" sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProgressRepr", into = "ProgressRepr")]
pub enum ProgressPair {
    Explicit(PaletteValue, PaletteValue),
    #[default]
    Compute,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ProgressRepr {
    Sentinel(String),
    Pair(PaletteValue, PaletteValue),
}

impl TryFrom<ProgressRepr> for ProgressPair {
    type Error = InvalidColorError;

    fn try_from(repr: ProgressRepr) -> Result<Self, Self::Error> {
        match repr {
            ProgressRepr::Sentinel(s) if s == COMPUTE => Ok(Self::Compute),
            ProgressRepr::Sentinel(s) => Err(InvalidColorError(s)),
            ProgressRepr::Pair(bar, trough) => Ok(Self::Explicit(bar, trough)),
        }
    }
}

impl From<ProgressPair> for ProgressRepr {
    fn from(pair: ProgressPair) -> Self {
        match pair {
            ProgressPair::Explicit(bar, trough) => Self::Pair(bar, trough),
            ProgressPair::Compute => Self::Sentinel(COMPUTE.to_owned()),
        }
    }
}

/// Identifier of one slot within a palette, including the halves of the
/// two-tone roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoleKey {
    Background,
    Text,
    Input,
    TextInput,
    Scroll,
    ButtonText,
    ButtonFill,
    ProgressBar,
    ProgressTrough,
}

/// A named theme's fixed-shape set of semantic color roles.
///
/// Palettes are plain data; once handed to a transition they are treated
/// as immutable snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Palette {
    pub background: PaletteValue,
    pub text: PaletteValue,
    pub input: PaletteValue,
    pub text_input: PaletteValue,
    pub scroll: PaletteValue,
    /// (button text, button fill).
    pub button: (PaletteValue, PaletteValue),
    /// (bar, trough), or computed from the roles above.
    #[serde(default)]
    pub progress: ProgressPair,
}

impl Palette {
    /// Value of a role slot. Progress roles on a "compute" palette are
    /// derived on demand, so this is total.
    pub fn role(&self, key: RoleKey) -> PaletteValue {
        match key {
            RoleKey::Background => self.background,
            RoleKey::Text => self.text,
            RoleKey::Input => self.input,
            RoleKey::TextInput => self.text_input,
            RoleKey::Scroll => self.scroll,
            RoleKey::ButtonText => self.button.0,
            RoleKey::ButtonFill => self.button.1,
            RoleKey::ProgressBar => self.progress_pair().0,
            RoleKey::ProgressTrough => self.progress_pair().1,
        }
    }

    /// The concrete progress pair, applying the computation rule when the
    /// palette uses the "compute" sentinel: a button fill distinct from
    /// both the input background and the window background pairs with the
    /// input background; otherwise the input text does.
    pub fn progress_pair(&self) -> (PaletteValue, PaletteValue) {
        match self.progress {
            ProgressPair::Explicit(bar, trough) => (bar, trough),
            ProgressPair::Compute => {
                if self.button.1 != self.input && self.button.1 != self.background {
                    (self.button.1, self.input)
                } else {
                    (self.text_input, self.input)
                }
            }
        }
    }

    /// Copy with the progress pair made explicit.
    pub fn normalized(&self) -> Palette {
        let (bar, trough) = self.progress_pair();
        Palette {
            progress: ProgressPair::Explicit(bar, trough),
            ..self.clone()
        }
    }

    /// Whether any slot carries the system-default sentinel.
    pub fn uses_system_defaults(&self) -> bool {
        let scalars = [
            self.background,
            self.text,
            self.input,
            self.text_input,
            self.scroll,
            self.button.0,
            self.button.1,
        ];
        if scalars.iter().any(|v| v.is_system_default()) {
            return true;
        }
        match self.progress {
            ProgressPair::Explicit(bar, trough) => {
                bar.is_system_default() || trough.is_system_default()
            }
            ProgressPair::Compute => false,
        }
    }
}
