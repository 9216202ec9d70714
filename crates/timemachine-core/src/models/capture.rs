//! Capture metadata embedded in an image file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata read from an image's embedded EXIF block.
///
/// Every field is optional: metadata is an enhancement, not a requirement,
/// for a record to be valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureMetadata {
    /// Capture timestamp. Original-capture field preferred over the
    /// generic file timestamp.
    pub taken_at: Option<DateTime<Utc>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Space-joined make and model; omitted unless both are present.
    pub camera: Option<String>,
}
