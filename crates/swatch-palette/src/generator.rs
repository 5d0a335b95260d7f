//! Palette generation: harmony targets turned into a fixed-size palette.
//!
//! ```text
//! locked colors ──► seed
//!                    │
//! base + mode ──► harmony targets ──► colors (locked hexes skipped)
//!                    │
//!                    ▼
//!            dedup by hex, truncate
//!                    │
//!                    ▼
//!          fill: base, then random colors
//! ```
//!
//! Generation never fails. A rule that cannot fill the palette (a base on
//! the value edge for `shades`, collisions with locked colors) is topped up
//! with random colors instead.

use std::collections::HashSet;

use rand::Rng;
use swatch_color::Hex;
use tracing::{debug, instrument, trace};

use crate::color::Color;
use crate::factory::ColorFactory;
use crate::harmony::{BasePlacement, PaletteMode};

/// Largest palette [`generate_palette`] will build.
pub const MAX_PALETTE_SIZE: usize = 4096;

/// Build a palette of `palette_size` colors around `base`.
///
/// `locked` colors come first, in order and unchanged. The rest is filled
/// by `mode`'s harmony rule. A target that lands on a locked hex is skipped
/// but still uses up one slot of the rule's budget, so a rule can come up
/// short and leave the remainder to the random fill. Duplicate hexes are
/// collapsed to their first occurrence.
///
/// When the locked colors already fill the palette, they are returned
/// (truncated) without running the rule, except in [`PaletteMode::None`].
///
/// `palette_size` is capped at [`MAX_PALETTE_SIZE`].
#[instrument(level = "debug", skip_all, fields(base = %base.hex(), mode = %mode, size = palette_size, locked = locked.len()))]
pub fn generate_palette<R: Rng + ?Sized>(
    factory: &ColorFactory<'_>,
    base: &Color,
    mode: PaletteMode,
    palette_size: usize,
    locked: &[Color],
    rng: &mut R,
) -> Vec<Color> {
    if palette_size > MAX_PALETTE_SIZE {
        debug!(requested = palette_size, max = MAX_PALETTE_SIZE, "clamping palette size");
    }
    let palette_size = palette_size.min(MAX_PALETTE_SIZE);

    let locked_hexes: HashSet<&Hex> = locked.iter().map(Color::hex).collect();
    let mut palette: Vec<Color> = locked.to_vec();
    let remaining = palette_size.saturating_sub(locked.len());

    if remaining == 0 && mode != PaletteMode::None {
        palette.truncate(palette_size);
        debug!("locked colors fill the palette");
        return palette;
    }

    let base_is_locked = locked_hexes.contains(base.hex());
    let placement = mode.base_placement();

    let mut capacity = remaining;
    if placement == BasePlacement::Leading && !base_is_locked {
        palette.push(base.clone());
        capacity = capacity.saturating_sub(1);
    }

    if mode == PaletteMode::None {
        fill_random(factory, &mut palette, &locked_hexes, capacity, palette_size.saturating_mul(2), rng);
    } else {
        for target in mode.targets(base.hsv(), capacity).into_iter().take(capacity) {
            match target.to_hex() {
                Ok(hex) if locked_hexes.contains(&hex) => {
                    trace!(%hex, "target collides with a locked color");
                }
                Ok(hex) => palette.push(factory.from_hex(&hex)),
                Err(err) => trace!(%err, "target has no hex"),
            }
        }
    }

    if placement == BasePlacement::Trailing && !base_is_locked {
        palette.push(base.clone());
    }

    let mut seen = HashSet::new();
    palette.retain(|c| seen.insert(c.hex().clone()));
    palette.truncate(palette_size);

    if palette.len() < palette_size {
        let missing = palette_size - palette.len();
        debug!(missing, "topping up palette");
        let mut present: HashSet<Hex> = palette.iter().map(|c| c.hex().clone()).collect();
        if present.insert(base.hex().clone()) {
            palette.push(base.clone());
        }
        while palette.len() < palette_size {
            let candidate = factory.random_color(rng);
            if present.insert(candidate.hex().clone()) {
                palette.push(candidate);
            }
        }
    }

    debug!(colors = palette.len(), "palette generated");
    palette
}

/// Append up to `wanted` random colors that are neither locked nor already
/// present, giving up after `attempts` draws.
fn fill_random<R: Rng + ?Sized>(
    factory: &ColorFactory<'_>,
    palette: &mut Vec<Color>,
    locked: &HashSet<&Hex>,
    mut wanted: usize,
    attempts: usize,
    rng: &mut R,
) {
    let mut present: HashSet<Hex> = palette.iter().map(|c| c.hex().clone()).collect();
    for _ in 0..attempts {
        if wanted == 0 {
            break;
        }
        let candidate = factory.random_color(rng);
        if locked.contains(candidate.hex()) || !present.insert(candidate.hex().clone()) {
            continue;
        }
        palette.push(candidate);
        wanted -= 1;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
