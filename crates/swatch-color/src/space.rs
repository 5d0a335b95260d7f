// SPDX-License-Identifier: MIT
//
// RGB and HSV color spaces, plus the two scalar measurements the rest of
// swatch sorts and matches on: relative luminance and squared RGB distance.
//
// Single-character variable names (r, g, b, h, s, v, c, x, m) follow the
// usual notation of the conversion formulas.
#![allow(clippy::many_single_char_names)]

use serde::{Deserialize, Serialize};

use crate::error::ColorError;
use crate::hex::{Hex, rgb_to_hex};

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from the low 24 bits of `value` (`0xRRGGBB`).
    #[inline]
    #[must_use]
    pub const fn from_u24(value: u32) -> Self {
        let [_, r, g, b] = value.to_be_bytes();
        Self { r, g, b }
    }

    /// Component-wise average, rounding halves up.
    ///
    /// This is a straight line through RGB, not a perceptual midpoint.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        let mid = |a: u8, b: u8| {
            let sum = u16::from(a) + u16::from(b) + 1;
            // sum / 2 <= 255
            u8::try_from(sum / 2).unwrap_or(u8::MAX)
        };
        Self::new(mid(self.r, other.r), mid(self.g, other.g), mid(self.b, other.b))
    }

    #[inline]
    #[must_use]
    pub fn to_hsv(self) -> Hsv {
        rgb_to_hsv(self)
    }

    #[inline]
    #[must_use]
    pub fn to_hex(self) -> Hex {
        Hex::from_rgb(self)
    }

    /// Relative luminance on a 0–100 scale.
    #[inline]
    #[must_use]
    pub fn luminance(self) -> u8 {
        calculate_luminance(self)
    }
}

// ─── Hsv ─────────────────────────────────────────────────────────────────────

/// Hue in whole degrees `[0, 360)`, saturation and value in `[0, 100]`.
///
/// The constructor wraps the hue and clamps the other two channels, and
/// deserialization goes through the same path, so an `Hsv` is always in
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "HsvParts")]
pub struct Hsv {
    h: u16,
    s: u8,
    v: u8,
}

#[derive(Deserialize)]
struct HsvParts {
    h: u16,
    s: u8,
    v: u8,
}

impl From<HsvParts> for Hsv {
    fn from(parts: HsvParts) -> Self {
        Self::new(parts.h, parts.s, parts.v)
    }
}

impl Hsv {
    #[must_use]
    pub const fn new(h: u16, s: u8, v: u8) -> Self {
        Self {
            h: h % 360,
            s: if s > 100 { 100 } else { s },
            v: if v > 100 { 100 } else { v },
        }
    }

    #[inline]
    #[must_use]
    pub const fn h(self) -> u16 {
        self.h
    }

    #[inline]
    #[must_use]
    pub const fn s(self) -> u8 {
        self.s
    }

    #[inline]
    #[must_use]
    pub const fn v(self) -> u8 {
        self.v
    }

    #[inline]
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        hsv_to_rgb(f64::from(self.h), f64::from(self.s), f64::from(self.v))
    }
}

// ─── Conversions ─────────────────────────────────────────────────────────────

/// Convert RGB to HSV.
///
/// Hue comes from the six-case formula on whichever channel is largest
/// (red, then green, then blue on ties), scaled to degrees and rounded.
/// Saturation is `delta / max` and value is `max`, both as rounded
/// percentages. Black and pure grays have hue 0; black has saturation 0.
#[must_use]
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max_channel = rgb.r.max(rgb.g).max(rgb.b);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max_channel == 0 { 0.0 } else { delta / max };

    let h = if delta > 0.0 {
        let sector = if max_channel == rgb.r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max_channel == rgb.g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        sector * 60.0
    } else {
        0.0
    };

    // A hue of 359.5 or above rounds onto 360, which is 0 again.
    Hsv::new(round_to_u16(h) % 360, percent(s), percent(max))
}

/// Convert HSV to RGB.
///
/// Takes fractional channels because palette rules produce fractional
/// targets. Hue is wrapped into `[0, 360)`, saturation and value are clamped
/// to `[0, 100]`, then the usual chroma / sector construction is applied
/// over six 60° sectors. Each output channel is rounded to the nearest
/// integer.
#[must_use]
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 100.0) / 100.0;
    let v = v.clamp(0.0, 100.0) / 100.0;

    let c = v * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match sector(h_prime) {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb::new(to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

/// Convert HSV straight to a hex string.
///
/// # Errors
///
/// Propagates [`rgb_to_hex`]'s validation failure.
pub fn hsv_to_hex(h: f64, s: f64, v: f64) -> Result<Hex, ColorError> {
    rgb_to_hex(hsv_to_rgb(h, s, v))
}

// ─── Luminance & Distance ────────────────────────────────────────────────────

/// Relative luminance of an sRGB color, scaled to `[0, 100]` and rounded.
///
/// Each channel is linearized (linear segment up to 0.03928, 2.4 power curve
/// above) and weighted 0.2126 / 0.7152 / 0.0722.
#[must_use]
pub fn calculate_luminance(rgb: Rgb) -> u8 {
    let r = linearize(f64::from(rgb.r) / 255.0);
    let g = linearize(f64::from(rgb.g) / 255.0);
    let b = linearize(f64::from(rgb.b) / 255.0);
    let luminance = 0.0722f64.mul_add(b, 0.2126f64.mul_add(r, 0.7152 * g));
    percent(luminance)
}

/// Squared Euclidean distance between two colors in RGB.
///
/// Only used to rank candidates, so the square root is skipped.
#[must_use]
pub fn calculate_rgb_distance_sq(a: Rgb, b: Rgb) -> u32 {
    let d = |x: u8, y: u8| {
        let diff = u32::from(x.abs_diff(y));
        diff * diff
    };
    d(a.r, b.r) + d(a.g, b.g) + d(a.b, b.b)
}

/// Remove the sRGB transfer curve from a single channel in `[0, 1]`.
#[inline]
fn linearize(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Rounding helpers ────────────────────────────────────────────────────────

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sector(h_prime: f64) -> u8 {
    // h_prime is in [0, 6]; 6 only when rem_euclid rounded up to 360.
    h_prime.floor().clamp(0.0, 6.0) as u8
}

/// A 0.0–1.0 channel to 0–255, rounding to nearest.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// A 0.0–1.0 fraction to a rounded 0–100 percentage.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(v: f64) -> u8 {
    (v * 100.0).round().clamp(0.0, 100.0) as u8
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_to_u16(v: f64) -> u16 {
    v.round().clamp(0.0, 360.0) as u16
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn channel_gap(a: u8, b: u8) -> u8 {
        a.abs_diff(b)
    }

    // ── RGB → HSV ────────────────────────────────────────────────────────

    #[test]
    fn red_to_hsv() {
        assert_eq!(rgb_to_hsv(Rgb::new(255, 0, 0)), Hsv::new(0, 100, 100));
    }

    #[test]
    fn primaries_and_secondaries_to_hsv() {
        let cases = [
            (Rgb::new(0, 255, 0), Hsv::new(120, 100, 100)),
            (Rgb::new(0, 0, 255), Hsv::new(240, 100, 100)),
            (Rgb::new(255, 255, 0), Hsv::new(60, 100, 100)),
            (Rgb::new(0, 255, 255), Hsv::new(180, 100, 100)),
            (Rgb::new(255, 0, 255), Hsv::new(300, 100, 100)),
        ];
        for (rgb, expected) in cases {
            assert_eq!(rgb_to_hsv(rgb), expected, "{rgb:?}");
        }
    }

    #[test]
    fn black_has_no_saturation_or_hue() {
        assert_eq!(rgb_to_hsv(Rgb::BLACK), Hsv::new(0, 0, 0));
    }

    #[test]
    fn grays_have_zero_hue_and_saturation() {
        assert_eq!(rgb_to_hsv(Rgb::new(128, 128, 128)), Hsv::new(0, 0, 50));
        assert_eq!(rgb_to_hsv(Rgb::WHITE), Hsv::new(0, 0, 100));
    }

    #[test]
    fn hue_near_360_wraps_to_zero() {
        // (g - b) / delta + 6 with b just above g lands on ~359.8°.
        let hsv = rgb_to_hsv(Rgb::new(255, 0, 1));
        assert_eq!(hsv.h(), 0);
    }

    #[test]
    fn hue_always_below_360() {
        for r in (0..=255u8).step_by(5) {
            for g in (0..=255u8).step_by(5) {
                for b in (0..=255u8).step_by(5) {
                    let hsv = rgb_to_hsv(Rgb::new(r, g, b));
                    assert!(hsv.h() < 360, "hue out of range for ({r}, {g}, {b})");
                    assert!(hsv.s() <= 100 && hsv.v() <= 100);
                }
            }
        }
    }

    // ── HSV → RGB ────────────────────────────────────────────────────────

    #[test]
    fn hsv_sectors_to_rgb() {
        let cases = [
            ((0.0, 100.0, 100.0), Rgb::new(255, 0, 0)),
            ((60.0, 100.0, 100.0), Rgb::new(255, 255, 0)),
            ((120.0, 100.0, 100.0), Rgb::new(0, 255, 0)),
            ((180.0, 100.0, 100.0), Rgb::new(0, 255, 255)),
            ((240.0, 100.0, 100.0), Rgb::new(0, 0, 255)),
            ((300.0, 100.0, 100.0), Rgb::new(255, 0, 255)),
            ((0.0, 0.0, 50.0), Rgb::new(128, 128, 128)),
        ];
        for ((h, s, v), expected) in cases {
            assert_eq!(hsv_to_rgb(h, s, v), expected, "hsv({h}, {s}, {v})");
        }
    }

    #[test]
    fn hsv_to_rgb_wraps_hue_and_clamps_channels() {
        assert_eq!(hsv_to_rgb(360.0, 100.0, 100.0), hsv_to_rgb(0.0, 100.0, 100.0));
        assert_eq!(hsv_to_rgb(-120.0, 100.0, 100.0), hsv_to_rgb(240.0, 100.0, 100.0));
        assert_eq!(hsv_to_rgb(0.0, 150.0, 120.0), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(0.0, -5.0, -5.0), Rgb::BLACK);
    }

    #[test]
    fn fractional_hsv_is_accepted() {
        // Palette rules hand in non-integer saturation and value.
        let rgb = hsv_to_rgb(200.0, 37.5, 62.5);
        assert_eq!(rgb, Rgb::new(100, 139, 159));
    }

    #[test]
    fn hsv_roundtrip_stays_close() {
        // Integer saturation and value quantize to 1%, which is 2.55 steps
        // of an 8-bit channel, so exact recovery is impossible in general.
        for r in (0..=255u8).step_by(3) {
            for g in (0..=255u8).step_by(3) {
                for b in (0..=255u8).step_by(5) {
                    let rgb = Rgb::new(r, g, b);
                    let back = rgb_to_hsv(rgb).to_rgb();
                    assert!(
                        channel_gap(rgb.r, back.r) <= 3
                            && channel_gap(rgb.g, back.g) <= 3
                            && channel_gap(rgb.b, back.b) <= 3,
                        "roundtrip drift: {rgb:?} -> {back:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn hsv_roundtrip_exact_for_pure_hues() {
        for rgb in [Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255), Rgb::BLACK, Rgb::WHITE] {
            assert_eq!(rgb_to_hsv(rgb).to_rgb(), rgb);
        }
    }

    #[test]
    fn hsv_new_normalizes() {
        let hsv = Hsv::new(725, 150, 101);
        assert_eq!((hsv.h(), hsv.s(), hsv.v()), (5, 100, 100));
    }

    #[test]
    fn hsv_deserialize_normalizes() {
        let hsv: Hsv = serde_json::from_str(r#"{"h":360,"s":100,"v":40}"#).unwrap();
        assert_eq!(hsv, Hsv::new(0, 100, 40));
    }

    // ── Luminance ────────────────────────────────────────────────────────

    #[test]
    fn luminance_of_red_is_21() {
        assert_eq!(calculate_luminance(Rgb::new(255, 0, 0)), 21);
    }

    #[test]
    fn luminance_extremes() {
        assert_eq!(calculate_luminance(Rgb::BLACK), 0);
        assert_eq!(calculate_luminance(Rgb::WHITE), 100);
        assert_eq!(calculate_luminance(Rgb::new(0, 255, 0)), 72);
        assert_eq!(calculate_luminance(Rgb::new(0, 0, 255)), 7);
    }

    #[test]
    fn luminance_is_not_hsv_value() {
        // Same HSV value, very different perceived brightness.
        let yellow = Rgb::new(255, 255, 0);
        let blue = Rgb::new(0, 0, 255);
        assert_eq!(yellow.to_hsv().v(), blue.to_hsv().v());
        assert!(yellow.luminance() > blue.luminance() * 5);
    }

    #[test]
    fn luminance_is_monotonic_per_channel() {
        for fixed in (0..=255u8).step_by(51) {
            let mut prev = (0, 0, 0);
            for step in 0..=255u8 {
                let lum = (
                    calculate_luminance(Rgb::new(step, fixed, fixed)),
                    calculate_luminance(Rgb::new(fixed, step, fixed)),
                    calculate_luminance(Rgb::new(fixed, fixed, step)),
                );
                if step > 0 {
                    assert!(lum.0 >= prev.0, "red channel decreased at {step}/{fixed}");
                    assert!(lum.1 >= prev.1, "green channel decreased at {step}/{fixed}");
                    assert!(lum.2 >= prev.2, "blue channel decreased at {step}/{fixed}");
                }
                prev = lum;
            }
        }
    }

    // ── Distance ─────────────────────────────────────────────────────────

    #[test]
    fn distance_is_squared_euclidean() {
        assert_eq!(calculate_rgb_distance_sq(Rgb::new(0, 0, 0), Rgb::new(3, 4, 0)), 25);
        assert_eq!(calculate_rgb_distance_sq(Rgb::BLACK, Rgb::WHITE), 3 * 255 * 255);
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = Rgb::new(10, 200, 30);
        let b = Rgb::new(250, 0, 99);
        assert_eq!(calculate_rgb_distance_sq(a, b), calculate_rgb_distance_sq(b, a));
        assert_eq!(calculate_rgb_distance_sq(a, a), 0);
    }

    // ── Rgb helpers ──────────────────────────────────────────────────────

    #[test]
    fn midpoint_rounds_half_up() {
        assert_eq!(Rgb::BLACK.midpoint(Rgb::WHITE), Rgb::new(128, 128, 128));
        assert_eq!(Rgb::new(10, 11, 0).midpoint(Rgb::new(20, 20, 1)), Rgb::new(15, 16, 1));
    }

    #[test]
    fn from_u24_splits_bytes() {
        assert_eq!(Rgb::from_u24(0x12_34_56), Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(Rgb::from_u24(0xFF_FF_FF), Rgb::WHITE);
    }
}
