//! Configuration module
//!
//! Settings come from the environment (optionally via a `.env` file picked
//! up by `dotenvy`), with defaults from [`crate::constants`].

use std::env;
use std::time::Duration;

use crate::constants;
use crate::error::CoreError;

/// Connection settings for the external record store service.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl StoreConfig {
    /// Read from `TIMEMACHINE_API_URL`, `TIMEMACHINE_API_KEY`, and
    /// `TIMEMACHINE_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();

        let base_url = env::var("TIMEMACHINE_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let api_key = env::var("TIMEMACHINE_API_KEY").ok();
        let timeout = match env::var("TIMEMACHINE_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    CoreError::Config(format!(
                        "TIMEMACHINE_REQUEST_TIMEOUT_SECS must be a number of seconds, got {raw:?}"
                    ))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => constants::REQUEST_TIMEOUT,
        };

        Ok(StoreConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
        })
    }
}

/// Limits applied to files entering an upload batch.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub max_file_size_bytes: usize,
    pub preview_edge: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        UploadConfig {
            max_file_size_bytes: constants::MAX_FILE_SIZE_BYTES,
            preview_edge: constants::PREVIEW_EDGE,
        }
    }
}

impl UploadConfig {
    /// Read from `TIMEMACHINE_MAX_FILE_SIZE_BYTES` and
    /// `TIMEMACHINE_PREVIEW_EDGE`, falling back to defaults.
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();

        let mut config = UploadConfig::default();
        if let Ok(raw) = env::var("TIMEMACHINE_MAX_FILE_SIZE_BYTES") {
            config.max_file_size_bytes = raw.parse().map_err(|_| {
                CoreError::Config(format!(
                    "TIMEMACHINE_MAX_FILE_SIZE_BYTES must be a byte count, got {raw:?}"
                ))
            })?;
        }
        if let Ok(raw) = env::var("TIMEMACHINE_PREVIEW_EDGE") {
            config.preview_edge = raw.parse().map_err(|_| {
                CoreError::Config(format!(
                    "TIMEMACHINE_PREVIEW_EDGE must be a pixel count, got {raw:?}"
                ))
            })?;
        }
        Ok(config)
    }
}
