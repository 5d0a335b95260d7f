//! Harmony rules: pure HSV target generation per palette mode.
//!
//! Each mode maps the base color's HSV and the number of free palette slots
//! to an ordered list of HSV targets. Nothing here builds colors or looks at
//! locked entries; [`generator`](crate::generator) does that.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use swatch_color::{ColorError, Hex, Hsv, hsv_to_hex};

/// Monochromatic steps taken in each direction.
const MONOCHROMATIC_STEPS: u32 = 4;

/// Hue spacing between analogous neighbours.
const ANALOGOUS_DEGREES: f64 = 30.0;

/// The closed set of palette rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteMode {
    /// The base plus random colors.
    #[default]
    None,
    /// One hue, stepping saturation and value.
    Monochromatic,
    /// The base and its opposite (+180°).
    Complementary,
    /// Neighbours at ±30° multiples.
    Analogous,
    /// +120° and +240°.
    Triad,
    /// The two neighbours of the complement (+150°, +210°).
    SplitComplementary,
    /// +90°, +180°, +270°.
    Square,
    /// +30° and the complements of both (+180°, +210°).
    Compound,
    /// Value-only variations around the base.
    Shades,
}

/// Where the base color goes relative to the generated targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasePlacement {
    /// Base first; it takes one slot before targets are generated.
    Leading,
    /// Base after the targets; targets get every free slot.
    Trailing,
}

/// A fractional HSV point produced by a harmony rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvTarget {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl HsvTarget {
    #[must_use]
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// `base` with its hue rotated by `degrees`, wrapped into `[0, 360)`.
    fn rotated(base: Hsv, degrees: f64) -> Self {
        Self::new(
            (f64::from(base.h()) + degrees).rem_euclid(360.0),
            f64::from(base.s()),
            f64::from(base.v()),
        )
    }

    /// # Errors
    ///
    /// Propagates hex validation from the conversion layer.
    pub fn to_hex(self) -> Result<Hex, ColorError> {
        hsv_to_hex(self.h, self.s, self.v)
    }
}

impl PaletteMode {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Monochromatic => "monochromatic",
            Self::Complementary => "complementary",
            Self::Analogous => "analogous",
            Self::Triad => "triad",
            Self::SplitComplementary => "split_complementary",
            Self::Square => "square",
            Self::Compound => "compound",
            Self::Shades => "shades",
        }
    }

    /// Parse a mode name (case-insensitive, `-` and `_` interchangeable).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.to_lowercase().replace('-', "_");
        Self::all().iter().find(|m| m.name() == normalized).copied()
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::None, Self::Monochromatic, Self::Complementary,
            Self::Analogous, Self::Triad, Self::SplitComplementary,
            Self::Square, Self::Compound, Self::Shades,
        ]
    }

    #[must_use]
    pub const fn base_placement(self) -> BasePlacement {
        match self {
            Self::Monochromatic | Self::Shades => BasePlacement::Trailing,
            _ => BasePlacement::Leading,
        }
    }

    /// HSV targets for this rule, in the order they should be tried.
    ///
    /// `capacity` is the number of slots left for targets. Rules with a
    /// fixed shape ignore it and the caller stops early; analogous and
    /// shades size themselves from it. [`PaletteMode::None`] has no targets.
    #[must_use]
    pub fn targets(self, base: Hsv, capacity: usize) -> Vec<HsvTarget> {
        match self {
            Self::None => Vec::new(),
            Self::Monochromatic => monochromatic(base),
            Self::Complementary => rotations(base, &[180.0]),
            Self::Analogous => analogous(base, capacity),
            Self::Triad => rotations(base, &[120.0, 240.0]),
            Self::SplitComplementary => rotations(base, &[180.0 - 30.0, 180.0 + 30.0]),
            Self::Square => rotations(base, &[90.0, 180.0, 270.0]),
            Self::Compound => rotations(base, &[30.0, 180.0, 210.0]),
            Self::Shades => shades(base, capacity),
        }
    }
}

impl fmt::Display for PaletteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            let names: Vec<&str> = Self::all().iter().map(|m| m.name()).collect();
            format!("unknown palette mode `{s}` (expected one of: {})", names.join(", "))
        })
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

fn rotations(base: Hsv, degrees: &[f64]) -> Vec<HsvTarget> {
    degrees.iter().map(|&d| HsvTarget::rotated(base, d)).collect()
}

/// Four lighter, less saturated steps, then four darker, more saturated ones.
/// Darker steps raise saturation at half the rate.
fn monochromatic(base: Hsv) -> Vec<HsvTarget> {
    let h = f64::from(base.h());
    let s = f64::from(base.s());
    let v = f64::from(base.v());
    let steps = f64::from(MONOCHROMATIC_STEPS);
    let s_step = (100.0 - s) / steps;
    let v_step = (100.0 - v) / steps;

    let lighter = (1..=MONOCHROMATIC_STEPS).map(|i| {
        let i = f64::from(i);
        HsvTarget::new(h, s_step.mul_add(-i, s).max(0.0), v_step.mul_add(i, v).min(100.0))
    });
    let darker = (1..=MONOCHROMATIC_STEPS).map(|i| {
        let i = f64::from(i);
        HsvTarget::new(
            h,
            (s_step * i).mul_add(0.5, s).clamp(0.0, 100.0),
            v_step.mul_add(-i, v).max(0.0),
        )
    });
    lighter.chain(darker).collect()
}

/// Counter-clockwise neighbours first, then clockwise; an odd slot goes to
/// the clockwise side.
fn analogous(base: Hsv, capacity: usize) -> Vec<HsvTarget> {
    let half = capacity / 2;
    let clockwise = capacity - half;
    let ccw = (1..=half).map(|i| HsvTarget::rotated(base, -ANALOGOUS_DEGREES * i as f64));
    let cw = (1..=clockwise).map(|i| HsvTarget::rotated(base, ANALOGOUS_DEGREES * i as f64));
    ccw.chain(cw).collect()
}

/// Value-only steps: darker first, then lighter. The step count per side is
/// half the free slots (one reserved for the base, rounded up) and the step
/// size spreads them over the distance to the nearer value extreme.
fn shades(base: Hsv, capacity: usize) -> Vec<HsvTarget> {
    let per_side = capacity.saturating_sub(1).div_ceil(2);
    if per_side == 0 {
        return Vec::new();
    }

    let h = f64::from(base.h());
    let s = f64::from(base.s());
    let v = f64::from(base.v());
    let step = v.min(100.0 - v) / per_side as f64;

    let darker = (1..=per_side).map(|i| HsvTarget::new(h, s, step.mul_add(-(i as f64), v).max(0.0)));
    let lighter = (1..=per_side).map(|i| HsvTarget::new(h, s, step.mul_add(i as f64, v).min(100.0)));
    darker.chain(lighter).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
