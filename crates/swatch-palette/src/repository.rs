//! Saved palettes and the "current palette" a host works on.
//!
//! ```text
//!   host ──► PaletteRepository ──► PaletteStorage (memory | files)
//!                  │
//!                  └──► generate_palette (regenerate)
//! ```
//!
//! The repository owns its storage and the current record. It starts out
//! uninitialized; [`PaletteRepository::load_current`] resolves the current
//! palette exactly once (the stored one if any, a fresh random one
//! otherwise) and later calls return it unchanged.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::factory::ColorFactory;
use crate::generator::generate_palette;
use crate::harmony::PaletteMode;
use crate::store::PaletteStorage;

/// Colors in a freshly created palette.
pub const NEW_PALETTE_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteStatus {
    #[default]
    Draft,
    Saved,
}

/// A stored palette. Timestamps are Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteRecord {
    pub id: Uuid,
    pub name: String,
    pub colors: Vec<Color>,
    pub status: PaletteStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl PaletteRecord {
    /// A new unnamed draft with a fresh id.
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            colors,
            status: PaletteStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Colors the user pinned, in palette order.
    #[must_use]
    pub fn locked_colors(&self) -> Vec<Color> {
        self.colors.iter().filter(|c| c.is_locked()).cloned().collect()
    }

    /// Bump `updated_at`. Never moves it backwards.
    pub fn touch(&mut self) {
        self.updated_at = self.updated_at.max(now_millis());
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[derive(Debug)]
pub struct PaletteRepository<S> {
    storage: S,
    current: Option<PaletteRecord>,
    initialized: bool,
}

impl<S: PaletteStorage> PaletteRepository<S> {
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            current: None,
            initialized: false,
        }
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Whether a current palette has been resolved.
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Resolve the current palette: the stored one when the current pointer
    /// names an existing record, otherwise a newly created one. Runs once;
    /// later calls return the already-resolved palette.
    ///
    /// # Errors
    ///
    /// Storage failures.
    #[instrument(level = "debug", skip_all)]
    pub fn load_current<R: Rng + ?Sized>(
        &mut self,
        factory: &ColorFactory<'_>,
        rng: &mut R,
    ) -> Result<&PaletteRecord> {
        if !self.initialized {
            let stored = match self.storage.current_id()? {
                Some(id) => {
                    let record = self.storage.get(id)?;
                    if record.is_none() {
                        warn!(%id, "current palette is missing from storage");
                    }
                    record
                }
                None => None,
            };
            match stored {
                Some(record) => {
                    debug!(id = %record.id, "current palette loaded");
                    self.current = Some(record);
                    self.initialized = true;
                }
                None => {
                    self.create(factory, rng)?;
                }
            }
        }
        self.current()
    }

    /// Every registered palette, in registration order. Ids whose record
    /// has gone missing are skipped.
    ///
    /// # Errors
    ///
    /// Storage failures, including records that no longer decode.
    #[instrument(level = "debug", skip_all)]
    pub fn load_all(&self) -> Result<Vec<PaletteRecord>> {
        let mut records = Vec::new();
        for id in self.storage.ids()? {
            match self.storage.get(id)? {
                Some(record) => records.push(record),
                None => warn!(%id, "registered palette is missing from storage"),
            }
        }
        debug!(count = records.len(), "palettes loaded");
        Ok(records)
    }

    /// The stored palette `id`.
    ///
    /// # Errors
    ///
    /// [`Error::PaletteNotFound`] when no such record exists.
    pub fn get(&self, id: Uuid) -> Result<PaletteRecord> {
        self.storage.get(id)?.ok_or(Error::PaletteNotFound(id))
    }

    /// Make the stored palette `id` current.
    ///
    /// # Errors
    ///
    /// [`Error::PaletteNotFound`] and storage failures.
    pub fn open(&mut self, id: Uuid) -> Result<&PaletteRecord> {
        let record = self.get(id)?;
        self.storage.set_current_id(id)?;
        self.current = Some(record);
        self.initialized = true;
        self.current()
    }

    /// Create a palette of [`NEW_PALETTE_SIZE`] random colors, store and
    /// register it, and make it current.
    ///
    /// # Errors
    ///
    /// Storage failures.
    pub fn create<R: Rng + ?Sized>(
        &mut self,
        factory: &ColorFactory<'_>,
        rng: &mut R,
    ) -> Result<&PaletteRecord> {
        let colors = (0..NEW_PALETTE_SIZE).map(|_| factory.random_color(rng)).collect();
        let record = PaletteRecord::new(colors);

        self.storage.set_current_id(record.id)?;
        self.storage.put(&record)?;
        self.storage.push_id(record.id)?;
        debug!(id = %record.id, "palette created");

        self.current = Some(record);
        self.initialized = true;
        self.current()
    }

    /// Store `record` as-is. If it is the current palette, the in-memory
    /// copy is replaced too.
    ///
    /// # Errors
    ///
    /// Storage failures.
    pub fn save(&mut self, record: &PaletteRecord) -> Result<()> {
        self.storage.put(record)?;
        self.storage.push_id(record.id)?;
        if let Some(current) = self.current.as_mut().filter(|c| c.id == record.id) {
            current.clone_from(record);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// [`Error::Uninitialized`] before a current palette is resolved.
    pub fn current(&self) -> Result<&PaletteRecord> {
        self.current.as_ref().ok_or(Error::Uninitialized)
    }

    /// Regenerate the current palette with `mode`, keeping its locked colors
    /// and its size. The first color is the base; an empty palette gets a
    /// random base and [`NEW_PALETTE_SIZE`] colors.
    ///
    /// # Errors
    ///
    /// [`Error::Uninitialized`] and storage failures.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        factory: &ColorFactory<'_>,
        mode: PaletteMode,
        rng: &mut R,
    ) -> Result<&PaletteRecord> {
        let current = self.current.as_mut().ok_or(Error::Uninitialized)?;
        let base = match current.colors.first() {
            Some(first) => first.clone(),
            None => factory.random_color(rng),
        };
        let size = match current.colors.len() {
            0 => NEW_PALETTE_SIZE,
            n => n,
        };
        let locked = current.locked_colors();

        current.colors = generate_palette(factory, &base, mode, size, &locked, rng);
        current.touch();
        self.storage.put(current)?;
        self.current()
    }

    /// Flip the lock on color `index` of the current palette and store it.
    /// Returns the new lock state.
    ///
    /// # Errors
    ///
    /// [`Error::Uninitialized`], [`Error::ColorIndex`] and storage failures.
    pub fn toggle_lock(&mut self, index: usize) -> Result<bool> {
        let current = self.current.as_mut().ok_or(Error::Uninitialized)?;
        let len = current.colors.len();
        let color = current
            .colors
            .get_mut(index)
            .ok_or(Error::ColorIndex { index, len })?;
        let locked = !color.is_locked();
        color.set_locked(locked);
        current.touch();
        self.storage.put(current)?;
        Ok(locked)
    }
}
