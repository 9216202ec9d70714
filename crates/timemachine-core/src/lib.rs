//! Time Machine core library
//!
//! This crate provides the domain models, file classifier, upload-form
//! parsing, configuration, and error types shared across all Time Machine
//! components. It performs no I/O.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use classifier::classify;
pub use config::{StoreConfig, UploadConfig};
pub use error::CoreError;
pub use models::{
    parse_tags, CaptureMetadata, MediaKind, MediaRecord, NewMediaRecord, RecordPatch,
    RecordStatus, UploadForm, UploadStatus, WorkingUploadItem,
};
