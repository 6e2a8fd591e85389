//! Error types for port operations.

/// Failures while pulling records from the remote catalog.
///
/// All variants are recoverable: the store keeps its previous contents and the
/// caller decides whether to retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (connect, timeout, TLS).
    #[error("Catalog request failed: {0}")]
    RequestFailed(String),

    /// The catalog answered with a non-success status.
    #[error("Catalog returned {status} for {url}")]
    Status { url: String, status: u16 },

    /// The body could not be decoded into the expected shape.
    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    pub fn request_failed(message: impl ToString) -> Self {
        Self::RequestFailed(message.to_string())
    }

    pub fn invalid_response(message: impl ToString) -> Self {
        Self::InvalidResponse(message.to_string())
    }
}
