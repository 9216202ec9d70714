//! Record store contract.

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use timemachine_core::models::{MediaKind, MediaRecord, NewMediaRecord, RecordPatch};

use crate::error::StoreResult;

/// Location of an uploaded binary in object storage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoredObject {
    pub storage_key: String,
    pub public_url: String,
}

/// Optional filters for record listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFilters {
    pub file_type: Option<MediaKind>,
}

/// Contract to the external record/object store service.
///
/// Every operation returns a tagged success/failure result; nothing here
/// panics on expected failure modes. Each record is single-writer (the
/// owning user) and every upload targets a uniquely named object, so
/// implementations need no client-side locking.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Upload raw file bytes; returns where the object landed.
    async fn upload_binary(
        &self,
        user_id: Uuid,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StoreResult<StoredObject>;

    /// Insert a record; the store assigns `id` and `created_at`.
    async fn create_record(&self, record: NewMediaRecord) -> StoreResult<MediaRecord>;

    /// All of a user's records, optionally narrowed by kind.
    async fn list_records(
        &self,
        user_id: Uuid,
        filters: Option<RecordFilters>,
    ) -> StoreResult<Vec<MediaRecord>>;

    /// Records visible on the timeline: `status == ready` only.
    async fn list_timeline_records(&self, user_id: Uuid) -> StoreResult<Vec<MediaRecord>>;

    /// Replace the patch's set fields on an existing record.
    async fn update_record(&self, id: Uuid, patch: RecordPatch) -> StoreResult<MediaRecord>;

    async fn delete_record(&self, id: Uuid) -> StoreResult<()>;
}
