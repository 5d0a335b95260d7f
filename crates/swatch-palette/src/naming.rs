//! Nearest-name lookup over a reference color table.
//!
//! The index is built once: every table entry is measured up front and
//! entries with a malformed hex are dropped. Lookup is a linear scan on
//! squared RGB distance. Ties go to the earliest entry, so results are stable
//! for a given table order.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use swatch_color::{ColorMetrics, Rgb, calculate_rgb_distance_sq};
use tracing::{debug, warn};

use crate::builtin::CSS_COLORS;
use crate::error::{Error, Result};

/// Name returned when the index has no entries.
pub const UNKNOWN_COLOR_NAME: &str = "Unknown";

/// One row of a reference table, as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedColor {
    pub hex: String,
    pub name: String,
}

impl From<(&str, &str)> for NamedColor {
    fn from((hex, name): (&str, &str)) -> Self {
        Self {
            hex: hex.to_owned(),
            name: name.to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
struct IndexEntry {
    rgb: Rgb,
    name: String,
}

/// Immutable, measured reference table.
#[derive(Debug, Clone, Default)]
pub struct NamingIndex {
    entries: Vec<IndexEntry>,
}

impl NamingIndex {
    /// Measure every entry of `table`. Entries whose hex does not parse are
    /// skipped with a warning.
    pub fn new<I, T>(table: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NamedColor>,
    {
        let mut dropped = 0usize;
        let entries: Vec<IndexEntry> = table
            .into_iter()
            .map(Into::into)
            .filter_map(|named: NamedColor| match ColorMetrics::from_hex(&named.hex) {
                Ok(metrics) => Some(IndexEntry {
                    rgb: metrics.rgb(),
                    name: named.name,
                }),
                Err(err) => {
                    warn!(name = %named.name, %err, "dropping reference color");
                    dropped += 1;
                    None
                }
            })
            .collect();

        if entries.is_empty() {
            warn!("naming index is empty; every color will be named {UNKNOWN_COLOR_NAME:?}");
        }
        debug!(entries = entries.len(), dropped, "naming index built");

        Self { entries }
    }

    /// The CSS named colors.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(CSS_COLORS.iter().copied())
    }

    /// Build from a JSON array of `{"hex": .., "name": ..}` objects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Table`] if `json` is not such an array. Individual
    /// entries with a bad hex are dropped, not reported.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Vec<NamedColor> = serde_json::from_str(json).map_err(Error::Table)?;
        Ok(Self::new(table))
    }

    /// Read a JSON table from disk.
    ///
    /// # Errors
    ///
    /// I/O failures and malformed JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&json)
    }

    /// Name of the entry closest to `rgb`, or [`UNKNOWN_COLOR_NAME`].
    #[must_use]
    pub fn closest_name(&self, rgb: Rgb) -> &str {
        let mut best: Option<(u32, &str)> = None;
        for entry in &self.entries {
            let dist = calculate_rgb_distance_sq(rgb, entry.rgb);
            if best.is_none_or(|(min, _)| dist < min) {
                best = Some((dist, &entry.name));
                if dist == 0 {
                    break;
                }
            }
        }
        best.map_or(UNKNOWN_COLOR_NAME, |(_, name)| name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small_table() -> NamingIndex {
        NamingIndex::new([
            ("#000000", "Black"),
            ("#ffffff", "White"),
            ("#ff0000", "Red"),
            ("#00ff00", "Green"),
            ("#0000ff", "Blue"),
        ])
    }

    #[test]
    fn exact_match() {
        let index = small_table();
        assert_eq!(index.closest_name(Rgb::new(255, 0, 0)), "Red");
        assert_eq!(index.closest_name(Rgb::WHITE), "White");
    }

    #[test]
    fn nearest_match() {
        let index = small_table();
        assert_eq!(index.closest_name(Rgb::new(240, 20, 10)), "Red");
        assert_eq!(index.closest_name(Rgb::new(30, 30, 30)), "Black");
        assert_eq!(index.closest_name(Rgb::new(10, 30, 200)), "Blue");
    }

    #[test]
    fn ties_keep_first_entry() {
        let index = NamingIndex::new([("#000000", "First"), ("#000000", "Second")]);
        assert_eq!(index.closest_name(Rgb::new(1, 1, 1)), "First");

        // Equidistant from both: (100,0,0) vs (0,100,0) from (50,50,0).
        let index = NamingIndex::new([("#640000", "Left"), ("#006400", "Right")]);
        assert_eq!(index.closest_name(Rgb::new(50, 50, 0)), "Left");
    }

    #[test]
    fn empty_index_returns_unknown() {
        let index = NamingIndex::new(Vec::<NamedColor>::new());
        assert!(index.is_empty());
        assert_eq!(index.closest_name(Rgb::new(12, 34, 56)), UNKNOWN_COLOR_NAME);
    }

    #[test]
    fn malformed_entries_are_dropped() {
        let index = NamingIndex::new([("#ff0000", "Red"), ("nope", "Broken"), ("#12", "Short")]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.closest_name(Rgb::BLACK), "Red");
    }

    #[test]
    fn short_hex_entries_are_accepted() {
        let index = NamingIndex::new([("F00", "Red")]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn lookup_is_deterministic() {
        let index = NamingIndex::builtin();
        for rgb in [Rgb::new(17, 99, 201), Rgb::new(250, 128, 114), Rgb::new(3, 3, 3)] {
            let first = index.closest_name(rgb).to_owned();
            for _ in 0..5 {
                assert_eq!(index.closest_name(rgb), first);
            }
        }
    }

    #[test]
    fn builtin_names_css_colors() {
        let index = NamingIndex::builtin();
        assert_eq!(index.len(), CSS_COLORS.len());
        assert_eq!(index.closest_name(Rgb::new(255, 0, 0)), "Red");
        // Aqua precedes its Cyan alias.
        assert_eq!(index.closest_name(Rgb::new(0, 255, 255)), "Aqua");
        assert_eq!(index.closest_name(Rgb::new(128, 128, 128)), "Gray");
    }

    #[test]
    fn shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NamingIndex>();
        assert_send_sync::<crate::ColorFactory<'static>>();
    }

    #[test]
    fn from_json_table() {
        let json = r##"[{"hex": "#123456", "name": "Deep"}, {"hex": "#fedcba", "name": "Pale"}]"##;
        let index = NamingIndex::from_json(json).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.closest_name(Rgb::new(0x10, 0x30, 0x50)), "Deep");
    }

    #[test]
    fn from_json_rejects_non_tables() {
        assert!(matches!(NamingIndex::from_json("{\"hex\": 1}"), Err(Error::Table(_))));
    }
}
