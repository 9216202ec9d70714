//! Persisted media records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Media kind enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Document,
    Note,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Document => "document",
            MediaKind::Note => "note",
        };
        f.write_str(s)
    }
}

impl FromStr for MediaKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            "document" => Ok(MediaKind::Document),
            "note" => Ok(MediaKind::Note),
            other => Err(CoreError::InvalidInput(format!(
                "unknown media kind: {other:?}"
            ))),
        }
    }
}

/// Record lifecycle status. The timeline only ever reads `Ready` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Processing,
    Ready,
}

/// One uploaded memory item, as persisted by the record store.
///
/// `created_at` is server-assigned but optional on the wire: timestamps
/// from the external service are parsed leniently, and a record whose
/// timestamp is missing or garbled still deserializes (it groups into the
/// unknown-date timeline bucket).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_url: String,
    pub file_name: String,
    pub file_type: MediaKind,
    pub file_size: i64,
    #[serde(default)]
    pub date_taken: Option<DateTime<Utc>>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub content: Option<String>,
    pub status: RecordStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl MediaRecord {
    /// Timestamp the timeline groups by: capture date when known,
    /// otherwise the server insertion time.
    pub fn effective_date(&self) -> Option<DateTime<Utc>> {
        self.date_taken.or(self.created_at)
    }
}

/// Creation payload for [`MediaRecord`]; the store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMediaRecord {
    pub user_id: Uuid,
    pub file_url: String,
    pub file_name: String,
    pub file_type: MediaKind,
    pub file_size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub status: RecordStatus,
}

/// Updatable fields for `update_record`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_round_trips_through_strings() {
        for kind in [
            MediaKind::Image,
            MediaKind::Video,
            MediaKind::Document,
            MediaKind::Note,
        ] {
            assert_eq!(kind.to_string().parse::<MediaKind>().unwrap(), kind);
        }
        assert!("gif".parse::<MediaKind>().is_err());
    }

    #[test]
    fn record_tolerates_missing_timestamps() {
        let json = r#"{
            "id": "6f2c0a80-6f6e-4a6e-9b5e-0d6f9a4f0a11",
            "user_id": "93d3a2bc-9f6e-41d2-8f93-1a2b3c4d5e6f",
            "file_url": "http://store/u/beach.jpg",
            "file_name": "beach.jpg",
            "file_type": "image",
            "file_size": 1024,
            "status": "ready"
        }"#;
        let record: MediaRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.created_at, None);
        assert_eq!(record.effective_date(), None);
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = RecordPatch {
            description: Some("sunset".to_string()),
            ..RecordPatch::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"description":"sunset"}"#);
    }
}
