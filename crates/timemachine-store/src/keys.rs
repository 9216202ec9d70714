//! Object key generation.
//!
//! Keys embed the upload instant, so every upload targets a uniquely
//! named object and write collisions are impossible by construction.

use chrono::Utc;
use uuid::Uuid;

use timemachine_core::constants::MAX_FILENAME_LEN;

/// Build the object key for one uploaded binary:
/// `{user_id}/{millis}-{sanitized_file_name}`.
pub fn object_key(user_id: Uuid, file_name: &str) -> String {
    format!(
        "{}/{}-{}",
        user_id,
        Utc::now().timestamp_millis(),
        sanitize_file_name(file_name)
    )
}

/// Reduce a user-supplied file name to a safe object-key segment.
///
/// Keeps alphanumerics plus `.`, `-`, `_`; everything else becomes `_`.
/// Path components and traversal sequences are stripped before the
/// character filter runs.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = std::path::Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_name);
    if base.contains("..") {
        return "file".to_string();
    }

    let safe: String = base
        .chars()
        .take(MAX_FILENAME_LEN)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if safe.trim_matches(['_', '.']).is_empty() {
        "file".to_string()
    } else {
        safe
    }
}
