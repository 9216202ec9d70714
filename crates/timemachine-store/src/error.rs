//! Store operation errors.

use thiserror::Error;

/// Store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached at all (connect or timeout).
    #[error("cannot connect to the record store: {0}")]
    Unavailable(String),

    /// The backend answered with a non-success status.
    #[error("record store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The backend answered, but not with what the contract promises.
    #[error("unexpected record store response: {0}")]
    InvalidResponse(String),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("store configuration error: {0}")]
    Config(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Message suitable for direct display in the upload or timeline UI.
    ///
    /// Connectivity failures collapse into a single service-unavailable
    /// message; everything else surfaces its own text.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Unavailable(_) => {
                "Cannot connect to the memory service. Check that the service is running and reachable."
                    .to_string()
            }
            StoreError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::InvalidResponse(err.to_string())
        } else {
            // Connect failures, timeouts, and anything else that kept the
            // request from completing count as unavailability.
            StoreError::Unavailable(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_maps_to_the_service_unavailable_message() {
        let err = StoreError::Unavailable("connection refused".to_string());
        assert!(err.is_unavailable());
        assert!(err.user_message().contains("Cannot connect"));
        // The transport detail stays out of the user-facing text.
        assert!(!err.user_message().contains("connection refused"));
    }

    #[test]
    fn rejected_surfaces_the_store_message() {
        let err = StoreError::Rejected {
            status: 413,
            message: "file too large".to_string(),
        };
        assert!(!err.is_unavailable());
        assert_eq!(err.user_message(), "file too large");
    }
}
