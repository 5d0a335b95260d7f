//! Palette persistence backends.
//!
//! A backend keeps three things: palette records by id, the ordered list of
//! known ids, and a pointer to the current palette. It knows nothing about
//! colors or generation; [`PaletteRepository`](crate::repository::PaletteRepository)
//! drives it.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use uuid::Uuid;

use crate::error::Result;
use crate::repository::PaletteRecord;

pub trait PaletteStorage {
    /// The record stored under `id`, if any.
    fn get(&self, id: Uuid) -> Result<Option<PaletteRecord>>;

    /// Insert or replace a record.
    fn put(&mut self, record: &PaletteRecord) -> Result<()>;

    /// Known ids in registration order.
    fn ids(&self) -> Result<Vec<Uuid>>;

    /// Append `id` to the known ids. Registering an id twice is a no-op.
    fn push_id(&mut self, id: Uuid) -> Result<()>;

    fn current_id(&self) -> Result<Option<Uuid>>;

    fn set_current_id(&mut self, id: Uuid) -> Result<()>;
}
