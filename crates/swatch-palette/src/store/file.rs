//! Directory-backed storage: one JSON file per palette.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::PaletteStorage;
use crate::error::{Error, Result};
use crate::repository::PaletteRecord;

const IDS_FILE: &str = "palette_ids.json";
const CURRENT_FILE: &str = "current.json";

/// One JSON file per palette, plus the id list and the current pointer,
/// all in a single directory:
///
/// ```text
/// <dir>/
///   palette_ids.json     ["<uuid>", ...]
///   current.json         "<uuid>"
///   <uuid>.json          PaletteRecord
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the directory cannot be created.
    #[instrument(level = "debug", skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Decode `path`, treating a missing file as `None`.
    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        match fs::read_to_string(path) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(path, e)),
        }
    }

    fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json).map_err(|e| Error::io(path, e))
    }
}

impl PaletteStorage for FileStorage {
    fn get(&self, id: Uuid) -> Result<Option<PaletteRecord>> {
        Self::read_json(&self.record_path(id))
    }

    fn put(&mut self, record: &PaletteRecord) -> Result<()> {
        let path = self.record_path(record.id);
        Self::write_json(&path, record)?;
        debug!(path = %path.display(), "palette written");
        Ok(())
    }

    fn ids(&self) -> Result<Vec<Uuid>> {
        Ok(Self::read_json(&self.dir.join(IDS_FILE))?.unwrap_or_default())
    }

    fn push_id(&mut self, id: Uuid) -> Result<()> {
        let mut ids = self.ids()?;
        if ids.contains(&id) {
            return Ok(());
        }
        ids.push(id);
        Self::write_json(&self.dir.join(IDS_FILE), &ids)
    }

    fn current_id(&self) -> Result<Option<Uuid>> {
        Self::read_json(&self.dir.join(CURRENT_FILE))
    }

    fn set_current_id(&mut self, id: Uuid) -> Result<()> {
        Self::write_json(&self.dir.join(CURRENT_FILE), &id)
    }
}
