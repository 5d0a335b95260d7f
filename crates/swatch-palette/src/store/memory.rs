//! In-memory storage backend.

use std::collections::HashMap;

use uuid::Uuid;

use super::PaletteStorage;
use crate::error::Result;
use crate::repository::PaletteRecord;

/// Process-local storage. Nothing survives the value being dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: HashMap<Uuid, PaletteRecord>,
    ids: Vec<Uuid>,
    current: Option<Uuid>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PaletteStorage for MemoryStorage {
    fn get(&self, id: Uuid) -> Result<Option<PaletteRecord>> {
        Ok(self.records.get(&id).cloned())
    }

    fn put(&mut self, record: &PaletteRecord) -> Result<()> {
        self.records.insert(record.id, record.clone());
        Ok(())
    }

    fn ids(&self) -> Result<Vec<Uuid>> {
        Ok(self.ids.clone())
    }

    fn push_id(&mut self, id: Uuid) -> Result<()> {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
        Ok(())
    }

    fn current_id(&self) -> Result<Option<Uuid>> {
        Ok(self.current)
    }

    fn set_current_id(&mut self, id: Uuid) -> Result<()> {
        self.current = Some(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::storage;

    #[test]
    fn put_and_get() {
        storage::test_put_and_get(MemoryStorage::new());
    }

    #[test]
    fn ids_keep_order() {
        storage::test_ids_keep_order(MemoryStorage::new());
    }

    #[test]
    fn current_pointer() {
        storage::test_current_pointer(MemoryStorage::new());
    }
}
