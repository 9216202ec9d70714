//! Batch progress observer seam.

use timemachine_core::models::WorkingUploadItem;

/// Observer for per-item state changes during an upload batch.
///
/// The ingestor calls [`ProgressSink::update`] after every status or
/// progress change so a front end can mirror the batch live.
/// Implementations must not block.
pub trait ProgressSink: Send + Sync {
    fn update(&self, item: &WorkingUploadItem);
}

/// Sink for callers that do not track progress.
pub struct NoOpProgressSink;

impl ProgressSink for NoOpProgressSink {
    fn update(&self, _item: &WorkingUploadItem) {}
}
