//! File classifier: declared content type to media kind.

use crate::models::MediaKind;

/// Map a file's declared content type to exactly one media kind.
///
/// Total over all inputs: plain text becomes a note, unrecognized and
/// empty strings fall through to [`MediaKind::Document`].
pub fn classify(content_type: &str) -> MediaKind {
    if content_type.starts_with("image/") {
        MediaKind::Image
    } else if content_type.starts_with("video/") {
        MediaKind::Video
    } else if content_type == "text/plain" {
        MediaKind::Note
    } else {
        MediaKind::Document
    }
}
