//! The fully-populated color record handed to consumers.

use serde::{Deserialize, Serialize};
use swatch_color::{ColorMetrics, Hex, Hsv, Rgb};

/// Luminance above which a color counts as `dark`.
pub const DARK_LUMINANCE_THRESHOLD: u8 = 22;

/// Whether a luminance value crosses [`DARK_LUMINANCE_THRESHOLD`].
#[must_use]
pub const fn is_dark(luminance: u8) -> bool {
    luminance > DARK_LUMINANCE_THRESHOLD
}

/// A color with its metrics, nearest name and palette flags.
///
/// Everything except `locked` is derived from `hex`. The fields are private
/// so the only way to get a different hex is to build a new record through
/// [`ColorFactory`](crate::factory::ColorFactory), which recomputes the rest.
///
/// Serialized flat:
///
/// ```json
/// {"hex":"#ff0000","r":255,"g":0,"b":0,"h":0,"s":100,"v":100,"l":21,
///  "name":"Red","locked":false,"dark":false}
/// ```
///
/// Deserializing reads only `hex`, `name` and `locked`. The metrics and the
/// `dark` flag are recomputed from the hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredColor")]
pub struct Color {
    hex: Hex,
    #[serde(flatten)]
    metrics: ColorMetrics,
    name: String,
    locked: bool,
    dark: bool,
}

#[derive(Deserialize)]
struct StoredColor {
    hex: Hex,
    name: String,
    #[serde(default)]
    locked: bool,
}

impl From<StoredColor> for Color {
    fn from(stored: StoredColor) -> Self {
        let metrics = ColorMetrics::from_rgb(stored.hex.to_rgb());
        Self::new(stored.hex, metrics, stored.name).with_locked(stored.locked)
    }
}

impl Color {
    pub(crate) fn new(hex: Hex, metrics: ColorMetrics, name: String) -> Self {
        Self {
            hex,
            dark: is_dark(metrics.luminance()),
            metrics,
            name,
            locked: false,
        }
    }

    #[must_use]
    pub const fn hex(&self) -> &Hex {
        &self.hex
    }

    #[must_use]
    pub const fn metrics(&self) -> &ColorMetrics {
        &self.metrics
    }

    #[must_use]
    pub const fn rgb(&self) -> Rgb {
        self.metrics.rgb()
    }

    #[must_use]
    pub const fn hsv(&self) -> Hsv {
        self.metrics.hsv()
    }

    #[must_use]
    pub const fn luminance(&self) -> u8 {
        self.metrics.luminance()
    }

    /// Name of the nearest reference color.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.dark
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Same hex as `other`.
    #[must_use]
    pub fn same_hex(&self, other: &Self) -> bool {
        self.hex == other.hex
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn red() -> Color {
        let hex = Hex::parse("#ff0000").unwrap();
        Color::new(hex, ColorMetrics::from_rgb(Rgb::new(255, 0, 0)), "Red".into())
    }

    #[test]
    fn dark_threshold_is_exclusive() {
        assert!(!is_dark(22));
        assert!(is_dark(23));
        assert!(!is_dark(0));
    }

    #[test]
    fn red_is_not_dark() {
        // Luminance 21 sits just under the threshold.
        let c = red();
        assert_eq!(c.luminance(), 21);
        assert!(!c.is_dark());
    }

    #[test]
    fn lock_flag_is_the_only_mutable_field() {
        let mut c = red();
        assert!(!c.is_locked());
        c.set_locked(true);
        assert!(c.is_locked());
        assert_eq!(c.hex().as_str(), "#ff0000");
        assert!(!c.with_locked(false).is_locked());
    }

    #[test]
    fn serializes_flat_record() {
        let json = serde_json::to_value(red()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "hex": "#ff0000",
                "r": 255, "g": 0, "b": 0,
                "h": 0, "s": 100, "v": 100,
                "l": 21,
                "name": "Red",
                "locked": false,
                "dark": false
            })
        );
    }

    #[test]
    fn deserializes_flat_record() {
        let original = red().with_locked(true);
        let json = serde_json::to_string(&original).unwrap();
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn deserializing_recomputes_from_hex() {
        let json = r##"{"hex": "#ff0000", "r": 1, "g": 2, "b": 3, "h": 200, "s": 5, "v": 6,
            "l": 99, "name": "Custom", "locked": true, "dark": true}"##;
        let c: Color = serde_json::from_str(json).unwrap();
        assert_eq!(c.rgb(), Rgb::new(255, 0, 0));
        assert_eq!(c.hsv(), red().hsv());
        assert_eq!(c.luminance(), 21);
        assert!(!c.is_dark());
        assert_eq!(c.name(), "Custom");
        assert!(c.is_locked());
    }

    #[test]
    fn deserializing_needs_only_hex_and_name() {
        let c: Color = serde_json::from_str(r##"{"hex": "#F00", "name": "Red"}"##).unwrap();
        assert_eq!(c, red());
    }

    #[test]
    fn deserializing_rejects_a_bad_hex() {
        let json = r##"{"hex": "#zz0000", "name": "Broken"}"##;
        assert!(serde_json::from_str::<Color>(json).is_err());
    }
}
