//! Ordered runs of colors along one HSV channel (scales and shades).
//!
//! Both generators hold two channels at the base color's values and move the
//! third. Results are ordered from the furthest step below the base to the
//! furthest step above it, with the base record itself in the middle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use swatch_color::{Hsv, hsv_to_hex};
use tracing::trace;

use crate::color::Color;
use crate::factory::ColorFactory;

/// Upper bound on steps per direction for [`generate_scale`] and
/// [`generate_shades`].
pub const MAX_STEPS: usize = 360;

/// The HSV channel a scale varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "h")]
    Hue,
    #[serde(rename = "s")]
    Saturation,
    #[default]
    #[serde(rename = "v")]
    Value,
}

impl Channel {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hue => "h",
            Self::Saturation => "s",
            Self::Value => "v",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Hue, Self::Saturation, Self::Value]
    }

    const fn is_hue(self) -> bool {
        matches!(self, Self::Hue)
    }

    fn read(self, hsv: Hsv) -> f64 {
        match self {
            Self::Hue => f64::from(hsv.h()),
            Self::Saturation => f64::from(hsv.s()),
            Self::Value => f64::from(hsv.v()),
        }
    }

    /// Wrap (hue) or clamp (saturation, value) into the channel's range.
    fn bound(self, value: f64) -> f64 {
        if self.is_hue() {
            value.rem_euclid(360.0)
        } else {
            value.clamp(0.0, 100.0)
        }
    }

    /// `hsv` as fractional channels with this channel replaced by `value`.
    fn with(self, hsv: Hsv, value: f64) -> (f64, f64, f64) {
        let (h, s, v) = (f64::from(hsv.h()), f64::from(hsv.s()), f64::from(hsv.v()));
        match self {
            Self::Hue => (value, s, v),
            Self::Saturation => (h, value, v),
            Self::Value => (h, s, value),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "h" | "hue" => Ok(Self::Hue),
            "s" | "saturation" => Ok(Self::Saturation),
            "v" | "value" => Ok(Self::Value),
            other => Err(format!("unknown channel `{other}` (expected h, s or v)")),
        }
    }
}

/// Vary `channel` around `base` by `step_size`, `steps` times each way.
///
/// Step `i` sits at `base ± i * step_size`. Hue wraps modulo 360; saturation
/// and value clamp to `[0, 100]`, so several steps may land on the same
/// color near a boundary. The base record is kept as-is at index `steps`.
/// A step whose hex cannot be produced is left out, which shortens the
/// result without moving the other offsets. `steps` is capped at
/// [`MAX_STEPS`].
#[must_use]
pub fn generate_scale(
    factory: &ColorFactory<'_>,
    channel: Channel,
    base: &Color,
    step_size: f64,
    steps: usize,
) -> Vec<Color> {
    if steps > MAX_STEPS {
        trace!(requested = steps, max = MAX_STEPS, "clamping scale steps");
    }
    let steps = steps.min(MAX_STEPS);
    let origin = channel.read(base.hsv());
    let at = |i: usize, sign: f64| {
        let value = channel.bound((i as f64 * step_size).mul_add(sign, origin));
        variant(factory, channel, base, value)
    };

    let mut out = Vec::with_capacity(steps * 2 + 1);
    out.extend((1..=steps).rev().filter_map(|i| at(i, -1.0)));
    out.push(base.clone());
    out.extend((1..=steps).filter_map(|i| at(i, 1.0)));
    out
}

/// Walk outward from `base` until the channel runs out of range.
///
/// Hue takes `floor(180 / step_size)` steps each way, wrapping. Saturation
/// and value keep stepping while the raw value stays in `[0, 100]`; the first
/// value past the edge is emitted once, clamped onto the edge, and that
/// direction stops there. A direction that starts on the edge emits nothing.
#[must_use]
pub fn generate_shades(
    factory: &ColorFactory<'_>,
    channel: Channel,
    base: &Color,
    step_size: f64,
) -> Vec<Color> {
    if !step_size.is_finite() || step_size <= 0.0 {
        return vec![base.clone()];
    }

    let origin = channel.read(base.hsv());
    let (below, above) = if channel.is_hue() {
        let steps = hue_steps(step_size);
        let values = |sign: f64| -> Vec<f64> {
            (1..=steps)
                .map(|i| channel.bound((i as f64 * step_size).mul_add(sign, origin)))
                .collect()
        };
        (values(-1.0), values(1.0))
    } else {
        (
            walk_to_edge(origin, -step_size),
            walk_to_edge(origin, step_size),
        )
    };

    let mut out = Vec::with_capacity(below.len() + above.len() + 1);
    out.extend(below.into_iter().rev().filter_map(|v| variant(factory, channel, base, v)));
    out.push(base.clone());
    out.extend(above.into_iter().filter_map(|v| variant(factory, channel, base, v)));
    out
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn hue_steps(step_size: f64) -> usize {
    ((180.0 / step_size).floor() as usize).min(MAX_STEPS)
}

/// Values from `origin + delta` outward, nearest first, stopping at the
/// first one outside `[0, 100]` (emitted clamped unless already on the edge).
fn walk_to_edge(origin: f64, delta: f64) -> Vec<f64> {
    let mut values = Vec::new();
    let mut last = origin;
    for i in 1..=MAX_STEPS {
        let raw = (i as f64).mul_add(delta, origin);
        if (0.0..=100.0).contains(&raw) {
            values.push(raw);
            last = raw;
            continue;
        }
        let edge = raw.clamp(0.0, 100.0);
        if (last - edge).abs() > f64::EPSILON {
            values.push(edge);
        }
        break;
    }
    values
}

fn variant(factory: &ColorFactory<'_>, channel: Channel, base: &Color, value: f64) -> Option<Color> {
    let (h, s, v) = channel.with(base.hsv(), value);
    match hsv_to_hex(h, s, v) {
        Ok(hex) => Some(factory.from_hex(&hex)),
        Err(err) => {
            trace!(%err, channel = %channel, value, "skipping scale step");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
