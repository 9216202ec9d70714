//! Batch upload orchestration.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};
use uuid::Uuid;

use timemachine_core::classifier::classify;
use timemachine_core::config::UploadConfig;
use timemachine_core::models::{
    parse_tags, MediaKind, MediaRecord, NewMediaRecord, RecordStatus, UploadForm,
    WorkingUploadItem,
};
use timemachine_metadata::{extract, MetadataParser};
use timemachine_store::{RecordStore, StoredObject};

use crate::preview::generate_preview;
use crate::progress::{NoOpProgressSink, ProgressSink};

/// One user-selected file entering a batch.
#[derive(Clone, Debug)]
pub struct RawFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A file that failed to ingest, with the message shown inline for it.
#[derive(Clone, Debug)]
pub struct UploadFailure {
    pub local_id: Uuid,
    pub file_name: String,
    pub message: String,
}

/// Outcome of one ingestion batch.
///
/// `created` and `failures` partition the batch; `items` carries the full
/// per-file terminal state, in input order. Whether the batch as a whole
/// "succeeded" is the caller's policy.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub created: Vec<MediaRecord>,
    pub failures: Vec<UploadFailure>,
    pub items: Vec<WorkingUploadItem>,
}

impl BatchResult {
    /// At least one file made it through.
    pub fn any_succeeded(&self) -> bool {
        !self.created.is_empty()
    }
}

/// Batch upload orchestrator.
///
/// Files are processed one at a time unless [`Ingestor::with_concurrency`]
/// raises the bound; either way each file's steps run strictly in order
/// and one file's failure never touches its siblings.
pub struct Ingestor {
    store: Arc<dyn RecordStore>,
    parser: Arc<dyn MetadataParser>,
    progress: Arc<dyn ProgressSink>,
    config: UploadConfig,
    concurrency: usize,
}

impl Ingestor {
    pub fn new(store: Arc<dyn RecordStore>, parser: Arc<dyn MetadataParser>) -> Self {
        Ingestor {
            store,
            parser,
            progress: Arc::new(NoOpProgressSink),
            config: UploadConfig::default(),
            concurrency: 1,
        }
    }

    /// Override upload limits and preview sizing.
    pub fn with_config(mut self, config: UploadConfig) -> Self {
        self.config = config;
        self
    }

    /// Mirror per-item state changes into `sink`.
    pub fn with_progress(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.progress = sink;
        self
    }

    /// Allow up to `limit` files in flight at once. Per-file ordering and
    /// batch isolation are unchanged; results stay in input order.
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    /// Ingest a batch of files for `user_id`.
    ///
    /// Never aborts early: every file reaches `Complete` or `Error`, and
    /// the result reports created records and per-file failures side by
    /// side.
    pub async fn ingest(
        &self,
        files: Vec<RawFile>,
        user_id: Uuid,
        form: &UploadForm,
    ) -> BatchResult {
        debug!(%user_id, files = files.len(), "starting upload batch");

        let outcomes: Vec<(WorkingUploadItem, Option<MediaRecord>)> =
            stream::iter(files.into_iter().map(|file| self.process_file(file, user_id, form)))
                .buffered(self.concurrency)
                .collect()
                .await;

        let mut batch = BatchResult::default();
        for (item, record) in outcomes {
            match record {
                Some(record) => batch.created.push(record),
                None => batch.failures.push(UploadFailure {
                    local_id: item.local_id,
                    file_name: item.file_name.clone(),
                    message: item
                        .error_message
                        .clone()
                        .unwrap_or_else(|| "upload failed".to_string()),
                }),
            }
            batch.items.push(item);
        }

        debug!(
            created = batch.created.len(),
            failed = batch.failures.len(),
            "upload batch finished"
        );
        batch
    }

    /// Run one file through classify → preview/extract → upload →
    /// create-record. Always returns a terminal item.
    async fn process_file(
        &self,
        file: RawFile,
        user_id: Uuid,
        form: &UploadForm,
    ) -> (WorkingUploadItem, Option<MediaRecord>) {
        let RawFile {
            name,
            content_type,
            data,
        } = file;

        let kind = classify(&content_type);
        let mut item = WorkingUploadItem::new(name.clone(), data.len() as i64, kind);
        self.progress.update(&item);

        if data.len() > self.config.max_file_size_bytes {
            item.fail(format!(
                "{} is larger than the {} byte upload limit",
                name, self.config.max_file_size_bytes
            ));
            self.progress.update(&item);
            return (item, None);
        }

        if kind == MediaKind::Image {
            // Image decode is CPU-bound; run it off the async pool.
            let bytes = data.clone();
            let edge = self.config.preview_edge;
            item.preview = tokio::task::spawn_blocking(move || generate_preview(&bytes, edge))
                .await
                .ok()
                .flatten();
            item.extracted = extract(kind, self.parser.as_ref(), &data);
        }

        // Note text must be read before the bytes move into the upload.
        // A file that is not valid UTF-8 simply gets no content.
        let content = if kind == MediaKind::Note {
            std::str::from_utf8(&data).ok().map(str::to_string)
        } else {
            None
        };
        let file_size = data.len() as i64;

        item.mark_uploading();
        self.progress.update(&item);

        let stored = match self
            .store
            .upload_binary(user_id, &name, &content_type, data)
            .await
        {
            Ok(stored) => stored,
            Err(err) => {
                warn!(file_name = %name, error = %err, "binary upload failed");
                item.fail(err.user_message());
                self.progress.update(&item);
                return (item, None);
            }
        };

        item.mark_processing();
        self.progress.update(&item);

        let record = assemble_record(&item, user_id, form, stored, file_size, content);
        match self.store.create_record(record).await {
            Ok(created) => {
                item.complete();
                self.progress.update(&item);
                (item, Some(created))
            }
            Err(err) => {
                warn!(file_name = %name, error = %err, "record creation failed");
                item.fail(err.user_message());
                self.progress.update(&item);
                (item, None)
            }
        }
    }
}

/// Assemble the persistent record for one uploaded file.
///
/// `date_taken` precedence: explicit form date, then extracted capture
/// timestamp, then absent.
fn assemble_record(
    item: &WorkingUploadItem,
    user_id: Uuid,
    form: &UploadForm,
    stored: StoredObject,
    file_size: i64,
    content: Option<String>,
) -> NewMediaRecord {
    let extracted = item.extracted.as_ref();
    NewMediaRecord {
        user_id,
        file_url: stored.public_url,
        file_name: item.file_name.clone(),
        file_type: item.kind,
        file_size,
        date_taken: form
            .custom_date
            .or_else(|| extracted.and_then(|m| m.taken_at)),
        latitude: extracted.and_then(|m| m.latitude),
        longitude: extracted.and_then(|m| m.longitude),
        description: form.description.clone(),
        location_name: form.location.clone(),
        tags: form.tags.as_deref().and_then(parse_tags),
        content,
        status: RecordStatus::Ready,
    }
}
