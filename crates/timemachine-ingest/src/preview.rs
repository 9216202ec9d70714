//! Best-effort preview thumbnails for image uploads.

use std::io::Cursor;

use image::ImageFormat;
use tracing::debug;

/// Generate a PNG thumbnail for an image with the given longest edge,
/// `None` when the bytes do not decode. A missing preview is never an
/// error.
///
/// Decoding is CPU-bound; call this under `spawn_blocking`.
pub fn generate_preview(data: &[u8], edge: u32) -> Option<Vec<u8>> {
    let decoded = match image::load_from_memory(data) {
        Ok(decoded) => decoded,
        Err(err) => {
            debug!(error = %err, "preview skipped, image did not decode");
            return None;
        }
    };

    let thumbnail = decoded.thumbnail(edge, edge);
    let mut out = Cursor::new(Vec::new());
    thumbnail.write_to(&mut out, ImageFormat::Png).ok()?;
    Some(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    use timemachine_core::constants::PREVIEW_EDGE;

    #[test]
    fn junk_bytes_yield_no_preview() {
        assert_eq!(generate_preview(&[], PREVIEW_EDGE), None);
        assert_eq!(generate_preview(b"definitely not pixels", PREVIEW_EDGE), None);
    }

    #[test]
    fn tiny_png_gets_a_preview() {
        // 1x1 white pixel, encoded through the same crate we decode with.
        let mut source = Cursor::new(Vec::new());
        image::RgbImage::from_pixel(1, 1, image::Rgb([255u8, 255, 255]))
            .write_to(&mut source, ImageFormat::Png)
            .unwrap();

        let preview = generate_preview(source.get_ref(), PREVIEW_EDGE).expect("decodes");
        assert!(!preview.is_empty());
        // PNG signature
        assert_eq!(&preview[..4], &[0x89, b'P', b'N', b'G']);
    }
}
