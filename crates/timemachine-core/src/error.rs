//! Core error types.

/// Errors raised by the core crate itself. Store and ingestion failures
/// have their own types in the crates that produce them.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
