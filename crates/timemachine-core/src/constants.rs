//! Shared defaults.

use std::time::Duration;

/// Default request timeout for store calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest edge of generated image previews, in pixels.
pub const PREVIEW_EDGE: u32 = 320;

/// Default cap on a single uploaded file (50 MiB).
pub const MAX_FILE_SIZE_BYTES: usize = 50 * 1024 * 1024;

/// Longest accepted object file name after sanitization.
pub const MAX_FILENAME_LEN: usize = 255;
