//! Domain models.

pub mod capture;
pub mod record;
pub mod upload;

pub use capture::CaptureMetadata;
pub use record::{MediaKind, MediaRecord, NewMediaRecord, RecordPatch, RecordStatus};
pub use upload::{parse_tags, UploadForm, UploadStatus, WorkingUploadItem};
