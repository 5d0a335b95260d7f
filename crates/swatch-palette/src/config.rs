//! `swatch.toml`: defaults for palette, scale, naming and storage.
//!
//! Every section and key is optional. A missing file section falls back to
//! the built-in defaults; unknown keys are rejected so typos surface.
//!
//! ```toml
//! [palette]
//! size = 6
//! mode = "triad"
//!
//! [scale]
//! step = 10
//! steps = 4
//! channel = "v"
//!
//! [naming]
//! table = "colors.json"
//!
//! [store]
//! dir = "~/.local/share/swatch"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::harmony::PaletteMode;
use crate::naming::NamingIndex;
use crate::scale::Channel;

pub const DEFAULT_PALETTE_SIZE: usize = 6;
pub const DEFAULT_SCALE_STEP: f64 = 10.0;
pub const DEFAULT_SCALE_STEPS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwatchConfig {
    pub palette: PaletteConfig,
    pub scale: ScaleConfig,
    pub naming: NamingConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    pub size: usize,
    pub mode: PaletteMode,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_PALETTE_SIZE,
            mode: PaletteMode::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaleConfig {
    /// Channel units per step (degrees for hue).
    pub step: f64,
    /// Steps on each side of the base, for scales.
    pub steps: usize,
    pub channel: Channel,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_SCALE_STEP,
            steps: DEFAULT_SCALE_STEPS,
            channel: Channel::Value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    /// JSON reference table; the built-in CSS colors when unset.
    pub table: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory for saved palettes; palettes are kept in memory when unset.
    pub dir: Option<PathBuf>,
}

impl SwatchConfig {
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// # Errors
    ///
    /// I/O failures and everything [`SwatchConfig::from_toml_str`] rejects.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// The configured reference table, or the built-in one.
    ///
    /// # Errors
    ///
    /// Failures reading or decoding the configured table.
    pub fn naming_index(&self) -> Result<NamingIndex> {
        self.naming
            .table
            .as_deref()
            .map_or_else(|| Ok(NamingIndex::builtin()), NamingIndex::load)
    }
}
