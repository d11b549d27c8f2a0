//! Wire types that only the client needs.

use serde::Deserialize;

use pawhub_core::ListingId;

/// Delete response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteResponse {
    /// True when the listing was removed.
    pub deleted: bool,
    /// ID of the deleted listing.
    pub id: ListingId,
}

/// API error envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
