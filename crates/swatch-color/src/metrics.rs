// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::error::ColorError;
use crate::hex::hex_to_rgb;
use crate::space::{Hsv, Rgb, calculate_luminance, rgb_to_hsv};

/// Every derived measurement of one color: RGB, HSV and luminance.
///
/// Serialized flat (`r g b h s v l`), which is the record shape swatch
/// persists palettes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMetrics {
    #[serde(flatten)]
    rgb: Rgb,
    #[serde(flatten)]
    hsv: Hsv,
    l: u8,
}

impl ColorMetrics {
    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            rgb,
            hsv: rgb_to_hsv(rgb),
            l: calculate_luminance(rgb),
        }
    }

    /// Parse `hex` and measure it.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] when `hex` does not parse.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        hex_to_rgb(hex).map(Self::from_rgb)
    }

    #[inline]
    #[must_use]
    pub const fn rgb(&self) -> Rgb {
        self.rgb
    }

    #[inline]
    #[must_use]
    pub const fn hsv(&self) -> Hsv {
        self.hsv
    }

    /// Relative luminance, 0–100.
    #[inline]
    #[must_use]
    pub const fn luminance(&self) -> u8 {
        self.l
    }
}

impl From<Rgb> for ColorMetrics {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb(rgb)
    }
}
