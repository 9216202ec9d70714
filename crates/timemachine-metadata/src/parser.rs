//! EXIF-backed implementation of [`MetadataParser`].

use std::io::Cursor;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use exif::{Exif, In, Tag, Value};
use tracing::debug;

use timemachine_core::models::CaptureMetadata;

use crate::gps;
use crate::MetadataParser;

/// Parses capture metadata out of an image's EXIF block.
///
/// Fail-open: no EXIF segment, corrupt data, and unsupported sub-formats
/// all yield `None` rather than an error, so a batch never stalls on bad
/// metadata.
#[derive(Debug, Default, Clone)]
pub struct ExifParser;

impl MetadataParser for ExifParser {
    fn parse(&self, data: &[u8]) -> Option<CaptureMetadata> {
        let mut cursor = Cursor::new(data);
        let exif_data = match exif::Reader::new().read_from_container(&mut cursor) {
            Ok(exif_data) => exif_data,
            Err(err) => {
                debug!(error = %err, "no readable exif data");
                return None;
            }
        };
        Some(capture_metadata(&exif_data))
    }
}

fn capture_metadata(exif_data: &Exif) -> CaptureMetadata {
    let taken_at = timestamp(exif_data, Tag::DateTimeOriginal, Tag::OffsetTimeOriginal)
        .or_else(|| timestamp(exif_data, Tag::DateTime, Tag::OffsetTime));

    let (latitude, longitude) = match gps::coordinates(exif_data) {
        Some((latitude, longitude)) => (Some(latitude), Some(longitude)),
        None => (None, None),
    };

    CaptureMetadata {
        taken_at,
        latitude,
        longitude,
        camera: camera(exif_data),
    }
}

/// Read one EXIF timestamp, honoring its offset field when present.
/// Naive timestamps without an offset are taken as UTC.
fn timestamp(exif_data: &Exif, stamp: Tag, offset: Tag) -> Option<DateTime<Utc>> {
    let field = exif_data.get_field(stamp, In::PRIMARY)?;
    let mut parsed = match field.value {
        Value::Ascii(ref components) => exif::DateTime::from_ascii(components.first()?).ok(),
        _ => None,
    }?;

    if let Some(offset_field) = exif_data.get_field(offset, In::PRIMARY) {
        if let Value::Ascii(ref components) = offset_field.value {
            if let Some(bytes) = components.first() {
                let _ = parsed.parse_offset(bytes);
            }
        }
    }

    let offset_minutes = i32::from(parsed.offset.unwrap_or(0));
    let zone = FixedOffset::east_opt(offset_minutes * 60)?;
    let date = NaiveDate::from_ymd_opt(
        parsed.year.into(),
        parsed.month.into(),
        parsed.day.into(),
    )?;
    let time = NaiveTime::from_hms_opt(
        parsed.hour.into(),
        parsed.minute.into(),
        parsed.second.into(),
    )?;

    zone.from_local_datetime(&date.and_time(time))
        .single()
        .map(|instant| instant.with_timezone(&Utc))
}

/// Space-joined make and model; omitted entirely unless both are present.
fn camera(exif_data: &Exif) -> Option<String> {
    let make = ascii_field(exif_data, Tag::Make)?;
    let model = ascii_field(exif_data, Tag::Model)?;
    Some(format!("{make} {model}"))
}

fn ascii_field(exif_data: &Exif, tag: Tag) -> Option<String> {
    let field = exif_data.get_field(tag, In::PRIMARY)?;
    match field.value {
        Value::Ascii(ref components) => {
            let text = String::from_utf8_lossy(components.first()?);
            let text = text.trim().trim_matches('\0').trim();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// Minimal little-endian TIFF with Make, Model, and DateTime entries
    /// in IFD0. Enough of a container for the exif reader to parse.
    fn tiff_fixture() -> Vec<u8> {
        let make = b"Canon\0";
        let model = b"EOS 80D\0";
        let date_time = b"2024:07:15 10:30:00\0";

        let mut buf = Vec::new();
        buf.extend_from_slice(b"II\x2A\x00"); // little-endian TIFF magic
        buf.extend_from_slice(&8u32.to_le_bytes()); // IFD0 offset

        // IFD0: 3 entries, then the out-of-line values.
        // Header (8) + count (2) + 3 * 12 + next offset (4) = 50.
        let data_start: u32 = 50;
        buf.extend_from_slice(&3u16.to_le_bytes());

        let mut entry = |tag: u16, len: u32, offset: u32| {
            buf.extend_from_slice(&tag.to_le_bytes());
            buf.extend_from_slice(&2u16.to_le_bytes()); // ASCII
            buf.extend_from_slice(&len.to_le_bytes());
            buf.extend_from_slice(&offset.to_le_bytes());
        };
        entry(0x010f, make.len() as u32, data_start); // Make
        entry(0x0110, model.len() as u32, data_start + make.len() as u32); // Model
        entry(
            0x0132, // DateTime
            date_time.len() as u32,
            data_start + (make.len() + model.len()) as u32,
        );

        buf.extend_from_slice(&0u32.to_le_bytes()); // no next IFD
        buf.extend_from_slice(make);
        buf.extend_from_slice(model);
        buf.extend_from_slice(date_time);
        buf
    }

    #[test]
    fn fails_open_on_junk_bytes() {
        let parser = ExifParser;
        assert_eq!(parser.parse(&[]), None);
        assert_eq!(parser.parse(b"not an image at all"), None);
        // Truncated JPEG: SOI marker and nothing else.
        assert_eq!(parser.parse(&[0xFF, 0xD8, 0xFF, 0xE1]), None);
    }

    #[test]
    fn reads_camera_and_timestamp_from_tiff() {
        let parser = ExifParser;
        let metadata = parser.parse(&tiff_fixture()).expect("fixture parses");

        assert_eq!(metadata.camera.as_deref(), Some("Canon EOS 80D"));
        // DateTime is the generic fallback; no offset field, so UTC.
        assert_eq!(
            metadata.taken_at,
            Some(Utc.with_ymd_and_hms(2024, 7, 15, 10, 30, 0).unwrap())
        );
        assert_eq!(metadata.latitude, None);
        assert_eq!(metadata.longitude, None);
    }

    #[test]
    fn partial_camera_is_omitted() {
        // Fixture has both fields; drop Model by truncating the entry's
        // tag to something unknown and re-parsing.
        let mut bytes = tiff_fixture();
        // Second entry starts at 10 + 12; overwrite its tag with a
        // private tag the reader keeps but `camera` does not look at.
        bytes[22] = 0xfe;
        bytes[23] = 0xfe;
        let parser = ExifParser;
        let metadata = parser.parse(&bytes).expect("fixture still parses");
        assert_eq!(metadata.camera, None);
    }
}
