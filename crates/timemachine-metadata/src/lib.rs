//! Fail-open capture-metadata extraction for uploaded images.
//!
//! The third-party EXIF parser is isolated behind the [`MetadataParser`]
//! capability trait so callers can be tested against a fake. The real
//! implementation, [`ExifParser`], absorbs every parse failure into
//! `None`: missing or corrupt metadata never fails an upload.

mod gps;
mod parser;

pub use parser::ExifParser;

use timemachine_core::models::{CaptureMetadata, MediaKind};

/// Capability seam over the embedded-metadata parser.
pub trait MetadataParser: Send + Sync {
    /// Parse capture metadata out of raw file bytes. `None` when the
    /// bytes carry no readable metadata, for any reason.
    fn parse(&self, data: &[u8]) -> Option<CaptureMetadata>;
}

/// Extract capture metadata for a classified file.
///
/// Non-image kinds return `None` immediately without touching the bytes.
pub fn extract(
    kind: MediaKind,
    parser: &dyn MetadataParser,
    data: &[u8],
) -> Option<CaptureMetadata> {
    if kind != MediaKind::Image {
        return None;
    }
    parser.parse(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingParser(AtomicUsize);

    impl MetadataParser for CountingParser {
        fn parse(&self, _data: &[u8]) -> Option<CaptureMetadata> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Some(CaptureMetadata::default())
        }
    }

    #[test]
    fn non_image_kinds_skip_the_parser() {
        let parser = CountingParser(AtomicUsize::new(0));
        for kind in [MediaKind::Video, MediaKind::Document, MediaKind::Note] {
            assert_eq!(extract(kind, &parser, b"anything"), None);
        }
        assert_eq!(parser.0.load(Ordering::SeqCst), 0);

        assert!(extract(MediaKind::Image, &parser, b"anything").is_some());
        assert_eq!(parser.0.load(Ordering::SeqCst), 1);
    }
}
