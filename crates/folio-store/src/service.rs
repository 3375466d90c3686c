//! Content service coordinating asset storage and the record store.
//!
//! Creation is a two-step transaction: the asset (if any) is written first,
//! then the record is inserted. A failed insert removes the asset it just
//! wrote, so storage never holds a file without an owning record.

use bytes::Bytes;
use chrono::Utc;

use folio_core::{ContentId, ContentRecord, NewContent, Result};

use crate::assets::AssetStorage;
use crate::records::ContentStore;

/// An uploaded file attached to a create request.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Client-supplied file name; only its extension is kept.
    pub filename: String,
    pub data: Bytes,
}

/// High-level content operations over a [`ContentStore`] and [`AssetStorage`].
#[derive(Debug)]
pub struct ContentService {
    records: ContentStore,
    assets: AssetStorage,
}

impl ContentService {
    /// Create a new `ContentService`.
    pub fn new(records: ContentStore, assets: AssetStorage) -> Self {
        Self { records, assets }
    }

    pub fn records(&self) -> &ContentStore {
        &self.records
    }

    pub fn assets(&self) -> &AssetStorage {
        &self.assets
    }

    /// Create a record with a freshly generated id, storing `upload` first.
    pub async fn create(
        &self,
        input: NewContent,
        upload: Option<Upload>,
    ) -> Result<ContentRecord> {
        self.create_with_id(ContentId::new(), input, upload).await
    }

    pub(crate) async fn create_with_id(
        &self,
        id: ContentId,
        input: NewContent,
        upload: Option<Upload>,
    ) -> Result<ContentRecord> {
        let now = Utc::now();

        let asset_reference = match upload {
            Some(upload) => Some(
                self.assets
                    .store(id, &input.content_type, &upload.filename, &upload.data)
                    .await?,
            ),
            None => None,
        };

        let record = ContentRecord::new(id, input, asset_reference, now);

        if let Err(e) = self.records.insert(record.clone()) {
            if let Some(ref reference) = record.asset_reference {
                tracing::warn!(
                    content_id = %id,
                    "Insert failed; removing stored asset {reference}"
                );
                if let Err(cleanup) = self.assets.remove(&record.content_type, reference).await {
                    tracing::error!(content_id = %id, "Asset rollback failed: {cleanup}");
                }
            }
            return Err(e);
        }

        tracing::info!(
            content_id = %id,
            content_type = %record.content_type,
            has_asset = record.asset_reference.is_some(),
            "Content created"
        );
        Ok(record)
    }

    /// List records of `type_filter` (all types when `None`) in insertion order.
    pub fn list(
        &self,
        type_filter: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> Vec<ContentRecord> {
        self.records.list(type_filter, offset, limit)
    }

    pub fn get(&self, id: ContentId) -> Result<ContentRecord> {
        self.records.get(id)
    }

    /// Remove a record and, if it had one, its asset.
    pub async fn delete(&self, id: ContentId) -> Result<ContentRecord> {
        let record = self.records.delete(id)?;

        if let Some(ref reference) = record.asset_reference {
            self.assets.remove(&record.content_type, reference).await?;
        }

        tracing::info!(content_id = %id, "Content deleted");
        Ok(record)
    }
}
