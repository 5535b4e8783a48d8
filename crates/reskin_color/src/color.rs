//! RGB/HSL color representation and string parsing.

use thiserror::Error;

use crate::named;

/// A string could not be parsed as a color.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{0}` is not a recognized color")]
pub struct InvalidColorError(pub String);

/// Clamp a channel value to the valid `[0, 1]` range.
#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// RGB color with channels normalized to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parse a color string: `#rrggbb`, `#rgb`, or a named color.
    ///
    /// Names are matched case-insensitively and ignoring spaces, so both
    /// `"GhostWhite"` and `"ghost white"` resolve to the same color.
    pub fn parse(s: &str) -> Result<Self, InvalidColorError> {
        let trimmed = s.trim();
        if let Some(digits) = trimmed.strip_prefix('#') {
            return parse_hex_digits(digits).ok_or_else(|| InvalidColorError(s.to_owned()));
        }
        let key: String = trimmed
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        named::lookup(&key)
            .map(Self::from_hex)
            .ok_or_else(|| InvalidColorError(s.to_owned()))
    }

    /// Export as a lowercase `#rrggbb` string.
    pub fn to_hex_string(&self) -> String {
        let (r, g, b) = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Quantized 8-bit channels.
    pub fn to_bytes(&self) -> (u8, u8, u8) {
        (
            (clamp01(self.r) * 255.0).round() as u8,
            (clamp01(self.g) * 255.0).round() as u8,
            (clamp01(self.b) * 255.0).round() as u8,
        )
    }

    /// Round-trip through 8-bit channels.
    ///
    /// Derived-color rules that are specified in terms of hex strings use
    /// this so their results do not depend on sub-quantum float noise.
    pub fn quantized(&self) -> Self {
        let (r, g, b) = self.to_bytes();
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Convert to HSL form.
    pub fn hsl(&self) -> Hsl {
        let r = clamp01(self.r);
        let g = clamp01(self.g);
        let b = clamp01(self.b);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let mut h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        h /= 6.0;
        Hsl { h, s, l }
    }

    /// Build from HSL form.
    pub fn from_hsl(hsl: Hsl) -> Self {
        let h = hsl.h.rem_euclid(1.0);
        let s = clamp01(hsl.s);
        let l = clamp01(hsl.l);

        if s == 0.0 {
            return Self::rgb(l, l, l);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self::rgb(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Hue/saturation/lightness, all channels in `[0, 1]`.
///
/// Hue wraps at 1.0 (one full turn of the color wheel).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

fn parse_hex_digits(digits: &str) -> Option<Color> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => {
            let value = u32::from_str_radix(digits, 16).ok()?;
            Some(Color::from_hex(value))
        }
        3 => {
            let value = u32::from_str_radix(digits, 16).ok()?;
            let r = (value >> 8) & 0xF;
            let g = (value >> 4) & 0xF;
            let b = value & 0xF;
            Some(Color::from_hex((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11))
        }
        _ => None,
    }
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
