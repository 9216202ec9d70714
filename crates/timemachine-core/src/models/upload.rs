//! Transient upload-batch state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::capture::CaptureMetadata;
use super::record::MediaKind;

/// Free-text metadata the user supplies for a batch.
///
/// `tags` is the raw comma-separated string from the form; it is split
/// with [`parse_tags`] when records are assembled.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub description: Option<String>,
    pub tags: Option<String>,
    pub location: Option<String>,
    /// Explicit capture date; takes precedence over extracted metadata.
    pub custom_date: Option<DateTime<Utc>>,
}

/// Split a comma-separated tag string into trimmed, non-empty tags.
///
/// Returns `None` when nothing survives, so an empty field is stored as
/// absent rather than an empty list. Order and duplicates are kept; case
/// is not normalized.
pub fn parse_tags(raw: &str) -> Option<Vec<String>> {
    let tags: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();
    if tags.is_empty() {
        None
    } else {
        Some(tags)
    }
}

/// Per-file lifecycle within an active batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Pending,
    Uploading,
    Processing,
    Complete,
    Error,
}

impl UploadStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, UploadStatus::Complete | UploadStatus::Error)
    }

    fn rank(self) -> u8 {
        match self {
            UploadStatus::Pending => 0,
            UploadStatus::Uploading => 1,
            UploadStatus::Processing => 2,
            UploadStatus::Complete => 3,
            UploadStatus::Error => 3,
        }
    }
}

/// Transient client-side tracking for one file during an active batch.
///
/// Status only ever moves forward through pending → uploading →
/// processing → complete, or diverts to error from any non-terminal
/// state. Terminal items are immutable; late transitions are ignored.
#[derive(Debug, Clone)]
pub struct WorkingUploadItem {
    pub local_id: Uuid,
    pub file_name: String,
    pub file_size: i64,
    pub kind: MediaKind,
    pub preview: Option<Vec<u8>>,
    pub extracted: Option<CaptureMetadata>,
    pub progress: u8,
    pub status: UploadStatus,
    pub error_message: Option<String>,
}

impl WorkingUploadItem {
    pub fn new(file_name: impl Into<String>, file_size: i64, kind: MediaKind) -> Self {
        WorkingUploadItem {
            local_id: Uuid::new_v4(),
            file_name: file_name.into(),
            file_size,
            kind,
            preview: None,
            extracted: None,
            progress: 0,
            status: UploadStatus::Pending,
            error_message: None,
        }
    }

    pub fn mark_uploading(&mut self) {
        self.advance(UploadStatus::Uploading, 25);
    }

    pub fn mark_processing(&mut self) {
        self.advance(UploadStatus::Processing, 75);
    }

    pub fn complete(&mut self) {
        self.advance(UploadStatus::Complete, 100);
    }

    /// Divert to `Error` with a human-readable message. No-op once
    /// terminal.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.status.is_terminal() {
            return;
        }
        self.status = UploadStatus::Error;
        self.error_message = Some(message.into());
    }

    // Forward-only: terminal items and backward moves are ignored.
    fn advance(&mut self, next: UploadStatus, progress: u8) {
        if self.status.is_terminal() || next.rank() <= self.status.rank() {
            return;
        }
        self.status = next;
        self.progress = progress;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_split_trim_and_drop_empties() {
        assert_eq!(
            parse_tags("a, b ,c,,d"),
            Some(vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
                "d".to_string()
            ])
        );
    }

    #[test]
    fn tag_parsing_is_round_trip_stable() {
        let tags = parse_tags("a, b ,c,,d").unwrap();
        let rejoined = tags.join(",");
        assert_eq!(parse_tags(&rejoined), Some(tags));
    }

    #[test]
    fn empty_tag_strings_are_absent() {
        assert_eq!(parse_tags(""), None);
        assert_eq!(parse_tags("  , ,,"), None);
    }

    #[test]
    fn tags_keep_order_duplicates_and_case() {
        assert_eq!(
            parse_tags("Sun,beach,Sun"),
            Some(vec![
                "Sun".to_string(),
                "beach".to_string(),
                "Sun".to_string()
            ])
        );
    }

    #[test]
    fn status_moves_forward_only() {
        let mut item = WorkingUploadItem::new("a.jpg", 10, MediaKind::Image);
        assert_eq!(item.status, UploadStatus::Pending);

        item.mark_uploading();
        assert_eq!(item.status, UploadStatus::Uploading);
        assert_eq!(item.progress, 25);

        item.mark_processing();
        assert_eq!(item.status, UploadStatus::Processing);

        // Backward move is ignored.
        item.mark_uploading();
        assert_eq!(item.status, UploadStatus::Processing);

        item.complete();
        assert_eq!(item.status, UploadStatus::Complete);
        assert_eq!(item.progress, 100);
    }

    #[test]
    fn terminal_items_are_immutable() {
        let mut item = WorkingUploadItem::new("a.jpg", 10, MediaKind::Image);
        item.fail("upload failed");
        assert_eq!(item.status, UploadStatus::Error);

        item.mark_uploading();
        item.complete();
        item.fail("second failure");
        assert_eq!(item.status, UploadStatus::Error);
        assert_eq!(item.error_message.as_deref(), Some("upload failed"));

        let mut done = WorkingUploadItem::new("b.jpg", 10, MediaKind::Image);
        done.mark_uploading();
        done.mark_processing();
        done.complete();
        done.fail("too late");
        assert_eq!(done.status, UploadStatus::Complete);
        assert_eq!(done.error_message, None);
    }

    #[test]
    fn error_can_divert_from_any_non_terminal_state() {
        for setup in [0u8, 1, 2] {
            let mut item = WorkingUploadItem::new("a.jpg", 10, MediaKind::Video);
            if setup >= 1 {
                item.mark_uploading();
            }
            if setup >= 2 {
                item.mark_processing();
            }
            item.fail("boom");
            assert_eq!(item.status, UploadStatus::Error);
        }
    }
}
