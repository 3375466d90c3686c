//! In-memory content record collection.
//!
//! Records are kept in insertion order behind a [`RwLock`] so readers never
//! block each other and structural mutations (insert, delete) are serialized.
//! Nothing is persisted; the collection lives as long as the process.

use parking_lot::RwLock;

use folio_core::{ContentId, ContentRecord, Error, Result};

/// Insertion-ordered store of [`ContentRecord`]s.
#[derive(Debug, Default)]
pub struct ContentStore {
    records: RwLock<Vec<ContentRecord>>,
}

impl ContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    ///
    /// Content is not deduplicated; only a second record carrying an id that
    /// is already present is refused with [`Error::Conflict`].
    pub fn insert(&self, record: ContentRecord) -> Result<()> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.id == record.id) {
            return Err(Error::Conflict(format!(
                "content id already exists: {}",
                record.id
            )));
        }
        records.push(record);
        Ok(())
    }

    /// Return the `[offset, offset + limit)` window of records whose type
    /// equals `type_filter` (all records when `None`), in insertion order.
    ///
    /// Out-of-range windows clamp to an empty result.
    pub fn list(
        &self,
        type_filter: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> Vec<ContentRecord> {
        self.records
            .read()
            .iter()
            .filter(|r| type_filter.map_or(true, |t| r.content_type == t))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Look up a single record by id.
    pub fn get(&self, id: ContentId) -> Result<ContentRecord> {
        self.records
            .read()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("content", id))
    }

    /// Remove a record by id and hand it back to the caller.
    pub fn delete(&self, id: ContentId) -> Result<ContentRecord> {
        let mut records = self.records.write();
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::not_found("content", id))?;
        Ok(records.remove(index))
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
