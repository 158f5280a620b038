//! Client error types.

use gallery_core::PaintingId;

/// Errors that can occur when using the gallery client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// The requested record doesn't exist.
    #[error("not found: {message}")]
    NotFound {
        /// Server message, e.g. `"Painting not found"`.
        message: String,
    },

    /// A painting in the order had already been sold.
    #[error("painting {painting_id} is not available")]
    PaintingUnavailable {
        /// The painting that could not be sold.
        painting_id: PaintingId,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
