//! Error types for PawHub core.

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// The offending field, in wire (camelCase) form.
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error for a field.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Shorthand for a missing required field.
    #[must_use]
    pub fn required(field: &'static str) -> Self {
        Self::new(field, "is required")
    }
}
