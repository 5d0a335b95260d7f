// SPDX-License-Identifier: MIT
//
// Hex color strings.
//
// Input is forgiving: `#RGB`, `#RRGGBB`, with or without the hash, any case.
// Output is strict: a `Hex` is always `#` followed by six lowercase digits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;
use crate::space::Rgb;

// ─── Hex ─────────────────────────────────────────────────────────────────────

/// A canonical `#rrggbb` color string.
///
/// Construction goes through [`Hex::parse`] or [`Hex::from_rgb`], so the
/// inner string never needs re-validation. Serializes as a plain JSON string
/// and rejects malformed strings when deserializing.
///
/// ```
/// use swatch_color::Hex;
///
/// let hex = Hex::parse("F0A").unwrap();
/// assert_eq!(hex.as_str(), "#ff00aa");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hex(String);

impl Hex {
    /// Parse any accepted hex form and canonicalize it.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] for anything other than 3 or 6 hex
    /// digits with an optional leading `#`.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        hex_to_rgb(s).map(Self::from_rgb)
    }

    /// Format an RGB triple. Infallible: every `Rgb` has a hex form.
    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self(format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b))
    }

    /// The RGB triple this hex encodes.
    #[must_use]
    pub fn to_rgb(&self) -> Rgb {
        let bytes = &self.0.as_bytes()[1..];
        // Canonical by construction, the fallbacks are unreachable.
        Rgb::new(
            parse_hex_byte(&bytes[0..2]).unwrap_or(0),
            parse_hex_byte(&bytes[2..4]).unwrap_or(0),
            parse_hex_byte(&bytes[4..6]).unwrap_or(0),
        )
    }

    /// The canonical string, including the leading `#`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Hex {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Hex {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Hex {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Hex> for String {
    fn from(hex: Hex) -> Self {
        hex.0
    }
}

impl From<Rgb> for Hex {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb(rgb)
    }
}

// ─── Free functions ──────────────────────────────────────────────────────────

/// Parse a hex color into RGB.
///
/// Accepts `#RGB` and `#RRGGBB`, hash optional, case-insensitive. The short
/// form duplicates each nibble (`#f0a` → `#ff00aa`).
///
/// # Errors
///
/// Returns [`ColorError::InvalidHex`] for any other length or a non-hex digit.
pub fn hex_to_rgb(s: &str) -> Result<Rgb, ColorError> {
    parse_hex(s).ok_or_else(|| ColorError::InvalidHex(s.to_owned()))
}

/// Format RGB as a canonical hex string.
///
/// The formatted string is checked against the accepted hex grammar before
/// it is returned; for an [`Rgb`] that check always passes.
///
/// # Errors
///
/// Returns [`ColorError::InvalidHex`] if the formatted string is rejected.
pub fn rgb_to_hex(rgb: Rgb) -> Result<Hex, ColorError> {
    let formatted = format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b);
    Hex::parse(&formatted)
}

/// Whether `s` is 3 or 6 hex digits with an optional leading `#`.
#[must_use]
pub fn is_valid_hex(s: &str) -> bool {
    parse_hex(s).is_some()
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Rgb> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Rgb::new(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // RRGGBB
        6 => Some(Rgb::new(
            parse_hex_byte(&bytes[0..2])?,
            parse_hex_byte(&bytes[2..4])?,
            parse_hex_byte(&bytes[4..6])?,
        )),
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Parsing ──────────────────────────────────────────────────────────

    #[test]
    fn parses_long_form() {
        assert_eq!(hex_to_rgb("#ff0000"), Ok(Rgb::new(255, 0, 0)));
        assert_eq!(hex_to_rgb("#1a2b3c"), Ok(Rgb::new(0x1a, 0x2b, 0x3c)));
    }

    #[test]
    fn parses_without_hash() {
        assert_eq!(hex_to_rgb("00ff00"), Ok(Rgb::new(0, 255, 0)));
        assert_eq!(hex_to_rgb("abc"), Ok(Rgb::new(0xaa, 0xbb, 0xcc)));
    }

    #[test]
    fn parses_short_form_by_duplicating_nibbles() {
        assert_eq!(hex_to_rgb("#f0a"), Ok(Rgb::new(0xff, 0x00, 0xaa)));
        assert_eq!(hex_to_rgb("#000"), Ok(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(hex_to_rgb("#ABCDEF"), hex_to_rgb("#abcdef"));
        assert_eq!(hex_to_rgb("#AbC"), Ok(Rgb::new(0xaa, 0xbb, 0xcc)));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "#", "#ff", "#ffff", "#fffff", "#fffffff", "#ff00000", "#gg0000", "##fff", " #fff", "#ff 000"] {
            assert_eq!(
                hex_to_rgb(bad),
                Err(ColorError::InvalidHex(bad.to_owned())),
                "{bad:?} should be rejected"
            );
            assert!(!is_valid_hex(bad), "{bad:?} should not be valid");
        }
    }

    #[test]
    fn validity_predicate_accepts_both_lengths() {
        assert!(is_valid_hex("#fff"));
        assert!(is_valid_hex("fff"));
        assert!(is_valid_hex("#FFFFFF"));
        assert!(is_valid_hex("123456"));
    }

    // ── Hex newtype ──────────────────────────────────────────────────────

    #[test]
    fn hex_is_canonical() {
        let hex = Hex::parse("ABC").unwrap();
        assert_eq!(hex.as_str(), "#aabbcc");
        assert_eq!(hex.to_string(), "#aabbcc");
    }

    #[test]
    fn hex_zero_pads_channels() {
        assert_eq!(Hex::from_rgb(Rgb::new(1, 2, 3)).as_str(), "#010203");
    }

    #[test]
    fn rgb_to_hex_roundtrips_exactly() {
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(17) {
                for b in [0, 1, 127, 128, 254, 255] {
                    let rgb = Rgb::new(r, g, b);
                    let hex = rgb_to_hex(rgb).unwrap();
                    assert_eq!(hex_to_rgb(hex.as_str()), Ok(rgb));
                    assert_eq!(hex.to_rgb(), rgb);
                }
            }
        }
    }

    #[test]
    fn hex_serializes_as_string() {
        let hex = Hex::parse("#FF8800").unwrap();
        assert_eq!(serde_json::to_string(&hex).unwrap(), "\"#ff8800\"");
        let back: Hex = serde_json::from_str("\"#f80\"").unwrap();
        assert_eq!(back, hex);
    }

    #[test]
    fn hex_deserialize_rejects_garbage() {
        let result: Result<Hex, _> = serde_json::from_str("\"not-a-color\"");
        assert!(result.is_err());
    }
}
