//! Client error types.

/// Errors that can occur when using the PawHub client.
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

    /// The server rejected a field.
    #[error("validation error on {field}: {message}")]
    Validation {
        /// The offending field, in wire form.
        field: String,
        /// Error message.
        message: String,
    },

    /// Listing not found.
    #[error("not found: {message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
