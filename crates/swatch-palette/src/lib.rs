//! # swatch-palette
//!
//! Names colors, builds scales and shades, and generates harmony palettes on
//! top of the `swatch-color` conversion layer.
//!
//! # Architecture
//!
//! ```text
//! reference table (builtin.rs or JSON)
//!     │
//!     ▼
//! naming.rs:     measured index, nearest name by RGB distance
//!     │
//!     ▼
//! factory.rs:    hex / random / midpoint → Color records
//!     │
//!     ├──► scale.rs:      one HSV channel stepped around a base
//!     │
//!     └──► harmony.rs:    PaletteMode → HSV targets (pure)
//!              │
//!              ▼
//!          generator.rs:  targets + locked colors → fixed-size palette
//!              │
//!              ▼
//!          repository.rs: current palette over a store/ backend
//! ```
//!
//! Everything up to the generator is synchronous and side-effect free apart
//! from the caller's random source. Storage lives only in the repository.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Step indices and counts are small; converting them to f64 is exact.
#![allow(clippy::cast_precision_loss)]
// h/s/v and their step names are inherently similar.
#![allow(clippy::similar_names)]

pub mod builtin;
pub mod color;
pub mod config;
pub mod error;
pub mod factory;
pub mod generator;
pub mod harmony;
pub mod naming;
pub mod repository;
pub mod scale;
pub mod store;

pub use color::Color;
pub use config::SwatchConfig;
pub use error::{Error, Result};
pub use factory::ColorFactory;
pub use generator::{MAX_PALETTE_SIZE, generate_palette};
pub use harmony::{HsvTarget, PaletteMode};
pub use naming::{NamedColor, NamingIndex};
pub use repository::{PaletteRecord, PaletteRepository, PaletteStatus};
pub use scale::{Channel, MAX_STEPS, generate_scale, generate_shades};
pub use store::{FileStorage, MemoryStorage, PaletteStorage};
