//! Error type for everything above the conversion layer.

use std::path::PathBuf;

use swatch_color::ColorError;
use uuid::Uuid;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Color(#[from] ColorError),

    /// A reference table that is not a JSON array of `{hex, name}`.
    #[error("malformed color table: {0}")]
    Table(#[source] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A stored palette record that no longer decodes.
    #[error("malformed palette record: {0}")]
    Record(#[from] serde_json::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("palette {0} not found")]
    PaletteNotFound(Uuid),

    /// An operation on the current palette before one was loaded or created.
    #[error("no current palette (load or create one first)")]
    Uninitialized,

    #[error("color index {index} out of range for a palette of {len}")]
    ColorIndex { index: usize, len: usize },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
