//! Progress-based color interpolation across three color-space strategies.

use crate::color::{clamp01, Color};

/// Interpolation strategy for a theme transition.
///
/// Each strategy has a different visual effect which may look better than
/// the others in certain scenarios.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Interpolation {
    /// Linear interpolation independently on the red, green, and blue
    /// channels.
    #[default]
    Rgb,
    /// Linear interpolation through HSL space along the raw numeric hue
    /// path. Deliberately takes the "long way around" the wheel when the
    /// end hue is numerically far from the start hue.
    HueForward,
    /// Interpolation through HSL space along the shorter angular path
    /// between the two hues, wrapping through 1.0 when that is shorter.
    HslShortest,
}

/// Blend `start` toward `end` by `progress` using the given strategy.
///
/// Progress at or past the endpoints returns the endpoint color exactly,
/// which keeps repeated frames from accumulating rounding drift.
pub fn blend(start: Color, end: Color, progress: f32, mode: Interpolation) -> Color {
    if progress <= 0.0 {
        return start;
    }
    if progress >= 1.0 {
        return end;
    }

    match mode {
        Interpolation::Rgb => Color::rgb(
            clamp01(lerp(start.r, end.r, progress)),
            clamp01(lerp(start.g, end.g, progress)),
            clamp01(lerp(start.b, end.b, progress)),
        ),
        Interpolation::HueForward => {
            let a = start.hsl();
            let b = end.hsl();
            Color::from_hsl(crate::Hsl {
                h: clamp01(lerp(a.h, b.h, progress)),
                s: clamp01(lerp(a.s, b.s, progress)),
                l: clamp01(lerp(a.l, b.l, progress)),
            })
        }
        Interpolation::HslShortest => {
            let mut a = start.hsl();
            let mut b = end.hsl();
            let mut p = progress;
            // Orient the pair so the hue distance is non-negative, then
            // decide whether the wrap-around path is shorter.
            if a.h > b.h {
                std::mem::swap(&mut a, &mut b);
                p = 1.0 - p;
            }
            let diff = b.h - a.h;
            let h = if diff > 0.5 {
                ((a.h + 1.0) + p * (b.h - (a.h + 1.0))).rem_euclid(1.0)
            } else {
                a.h + p * diff
            };
            Color::from_hsl(crate::Hsl {
                h: clamp01(h),
                s: clamp01(lerp(a.s, b.s, p)),
                l: clamp01(lerp(a.l, b.l, p)),
            })
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [Interpolation; 3] = [
        Interpolation::Rgb,
        Interpolation::HueForward,
        Interpolation::HslShortest,
    ];

    #[test]
    fn blending_a_color_with_itself_is_identity() {
        let c = Color::parse("#fb9583").unwrap();
        for mode in MODES {
            for p in [0.0, 0.1, 0.25, 0.5, 0.9, 1.0] {
                let out = blend(c, c, p, mode);
                assert_eq!(out.to_hex_string(), c.to_hex_string(), "{mode:?} p={p}");
            }
        }
    }

    #[test]
    fn endpoints_are_exact() {
        let a = Color::parse("#1a2835").unwrap();
        let b = Color::parse("#fdcb52").unwrap();
        for mode in MODES {
            assert_eq!(blend(a, b, 0.0, mode), a);
            assert_eq!(blend(a, b, 1.0, mode), b);
            // Out-of-range progress pins to the endpoints rather than
            // overshooting.
            assert_eq!(blend(a, b, -0.5, mode), a);
            assert_eq!(blend(a, b, 1.5, mode), b);
        }
    }

    #[test]
    fn rgb_midpoint_is_channelwise() {
        let a = Color::rgb(0.0, 0.2, 1.0);
        let b = Color::rgb(1.0, 0.6, 0.0);
        let mid = blend(a, b, 0.5, Interpolation::Rgb);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.g - 0.4).abs() < 1e-6);
        assert!((mid.b - 0.5).abs() < 1e-6);
    }

    #[test]
    fn shortest_hue_never_crosses_half_the_wheel() {
        // Hues 0.9 and 0.1: the short path runs through the wrap point and
        // spans 0.2 of the wheel.
        let a = Color::from_hsl(crate::Hsl { h: 0.9, s: 1.0, l: 0.5 });
        let b = Color::from_hsl(crate::Hsl { h: 0.1, s: 1.0, l: 0.5 });
        for p in [0.1, 0.3, 0.5, 0.7, 0.9] {
            let h = blend(a, b, p, Interpolation::HslShortest).hsl().h;
            let from_start = (h - 0.9).rem_euclid(1.0).min((0.9 - h).rem_euclid(1.0));
            let from_end = (h - 0.1).rem_euclid(1.0).min((0.1 - h).rem_euclid(1.0));
            assert!(
                from_start <= 0.2 + 1e-3 && from_end <= 0.2 + 1e-3,
                "p={p} produced hue {h} off the short arc"
            );
        }
    }

    #[test]
    fn shortest_hue_midpoint_wraps_through_zero() {
        let a = Color::from_hsl(crate::Hsl { h: 0.9, s: 1.0, l: 0.5 });
        let b = Color::from_hsl(crate::Hsl { h: 0.1, s: 1.0, l: 0.5 });
        let mid = blend(a, b, 0.5, Interpolation::HslShortest).hsl();
        assert!(
            mid.h < 0.05 || mid.h > 0.95,
            "midpoint hue {} should sit near the wrap point",
            mid.h
        );
    }

    #[test]
    fn hue_forward_takes_the_numeric_path() {
        // Same endpoints as above: the forward mode walks 0.9 -> 0.1
        // numerically, straight across the middle of the wheel.
        let a = Color::from_hsl(crate::Hsl { h: 0.9, s: 1.0, l: 0.5 });
        let b = Color::from_hsl(crate::Hsl { h: 0.1, s: 1.0, l: 0.5 });
        let mid = blend(a, b, 0.5, Interpolation::HueForward).hsl();
        assert!(
            (mid.h - 0.5).abs() < 0.02,
            "midpoint hue {} should cross the middle of the wheel",
            mid.h
        );
    }

    #[test]
    fn saturation_and_lightness_lerp_in_both_hsl_modes() {
        let a = Color::from_hsl(crate::Hsl { h: 0.2, s: 0.2, l: 0.2 });
        let b = Color::from_hsl(crate::Hsl { h: 0.4, s: 0.8, l: 0.6 });
        for mode in [Interpolation::HueForward, Interpolation::HslShortest] {
            let mid = blend(a, b, 0.5, mode).hsl();
            assert!((mid.s - 0.5).abs() < 0.02, "{mode:?} s={}", mid.s);
            assert!((mid.l - 0.4).abs() < 0.02, "{mode:?} l={}", mid.l);
        }
    }
}
