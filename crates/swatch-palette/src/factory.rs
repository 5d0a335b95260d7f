//! Color construction. The single entry point for building [`Color`]s.

use rand::Rng;
use swatch_color::{ColorError, ColorMetrics, Hex, Rgb, hex_to_rgb};

use crate::color::Color;
use crate::naming::NamingIndex;

/// Builds fully-populated color records against one naming index.
///
/// Cheap to copy; it only borrows the index.
#[derive(Debug, Clone, Copy)]
pub struct ColorFactory<'a> {
    index: &'a NamingIndex,
}

impl<'a> ColorFactory<'a> {
    #[must_use]
    pub const fn new(index: &'a NamingIndex) -> Self {
        Self { index }
    }

    #[must_use]
    pub const fn index(&self) -> &'a NamingIndex {
        self.index
    }

    /// Build a color from any accepted hex form. The stored hex is
    /// canonicalized to `#rrggbb`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] for malformed input.
    pub fn color(&self, hex: &str) -> Result<Color, ColorError> {
        hex_to_rgb(hex).map(|rgb| self.from_rgb(rgb))
    }

    /// Build a color from a hex that is already known to be valid.
    #[must_use]
    pub fn from_hex(&self, hex: &Hex) -> Color {
        self.from_rgb(hex.to_rgb())
    }

    #[must_use]
    pub fn from_rgb(&self, rgb: Rgb) -> Color {
        let metrics = ColorMetrics::from_rgb(rgb);
        let name = self.index.closest_name(rgb).to_owned();
        Color::new(Hex::from_rgb(rgb), metrics, name)
    }

    /// A uniformly random 24-bit color.
    pub fn random_color<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        self.from_rgb(Rgb::from_u24(rng.random_range(0..=0x00FF_FFFF)))
    }

    /// Build from `hex` when given, otherwise draw a random color.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] when `hex` is given and malformed.
    pub fn generate_color<R: Rng + ?Sized>(
        &self,
        hex: Option<&str>,
        rng: &mut R,
    ) -> Result<Color, ColorError> {
        match hex {
            Some(hex) => self.color(hex),
            None => Ok(self.random_color(rng)),
        }
    }

    /// The color halfway between two hex colors, averaged per RGB channel.
    ///
    /// This is linear interpolation in RGB, not in a perceptual space: the
    /// midpoint of two saturated complements comes out gray.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] if either input is malformed.
    pub fn middle_color(&self, hex_a: &str, hex_b: &str) -> Result<Color, ColorError> {
        let a = hex_to_rgb(hex_a)?;
        let b = hex_to_rgb(hex_b)?;
        let middle = swatch_color::rgb_to_hex(a.midpoint(b))?;
        Ok(self.from_hex(&middle))
    }
}
