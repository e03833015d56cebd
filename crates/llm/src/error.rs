use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConversionError>;

/// Errors from the byte-level entry point. Converting an already parsed request cannot fail.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The body is not a JSON request document.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    /// The converted request could not be encoded.
    #[error("Failed to encode converted request: {0}")]
    Encode(#[source] serde_json::Error),
}
