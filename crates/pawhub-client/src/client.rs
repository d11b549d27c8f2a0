//! PawHub HTTP client implementation.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use pawhub_core::{
    run_query, Listing, ListingDraft, ListingId, ListingPatch, ListingQuery, Page, PageLimits,
};

use crate::error::ClientError;
use crate::types::{ApiErrorResponse, DeleteResponse};

/// PawHub API client.
///
/// Wraps the listing endpoints and maps error bodies to [`ClientError`].
#[derive(Debug, Clone)]
pub struct PawhubClient {
    client: Client,
    base_url: String,
    page_limits: PageLimits,
}

impl PawhubClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the PawHub service (e.g., `"http://pawhub:8080"`)
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the URL is not absolute or the
    /// HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the URL is not absolute or the
    /// HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| {
            ClientError::Configuration(format!("invalid base URL `{base_url}`: {e}"))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            page_limits: options.page_limits,
        })
    }

    /// Search listings.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_listings(&self, query: &ListingQuery) -> Result<Page<Listing>, ClientError> {
        let url = format!("{}/v1/listings", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&query_params(query))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Search listings, falling back to `local` when the service call fails.
    ///
    /// The fallback normalizes paging and runs the same engine the service
    /// runs, so callers get the same page either way. Failures are logged, not
    /// returned.
    pub async fn list_listings_or_local(
        &self,
        query: &ListingQuery,
        local: &[Listing],
    ) -> Page<Listing> {
        match self.list_listings(query).await {
            Ok(page) => page,
            Err(error) => {
                tracing::warn!(
                    %error,
                    local_listings = local.len(),
                    "Listing search failed, using local listings"
                );
                run_query(local, &query.clone().normalized(self.page_limits))
            }
        }
    }

    /// Get a single listing.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if no listing has this ID, or another
    /// error if the request fails.
    pub async fn get_listing(&self, id: &ListingId) -> Result<Listing, ClientError> {
        let url = format!("{}/v1/listings/{id}", self.base_url);

        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Create a listing.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the draft is rejected, or another
    /// error if the request fails.
    pub async fn create_listing(&self, draft: &ListingDraft) -> Result<Listing, ClientError> {
        let url = format!("{}/v1/listings", self.base_url);

        let response = self.client.post(&url).json(draft).send().await?;

        self.handle_response(response).await
    }

    /// Update a listing.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] or [`ClientError::Validation`] as
    /// reported by the server, or another error if the request fails.
    pub async fn update_listing(
        &self,
        id: &ListingId,
        patch: &ListingPatch,
    ) -> Result<Listing, ClientError> {
        let url = format!("{}/v1/listings/{id}", self.base_url);

        let response = self.client.patch(&url).json(patch).send().await?;

        self.handle_response(response).await
    }

    /// Delete a listing.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if no listing has this ID, or another
    /// error if the request fails.
    pub async fn delete_listing(&self, id: &ListingId) -> Result<DeleteResponse, ClientError> {
        let url = format!("{}/v1/listings/{id}", self.base_url);

        let response = self.client.delete(&url).send().await?;

        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&body)?);
        }

        let Ok(api_error) = serde_json::from_slice::<ApiErrorResponse>(&body) else {
            return Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            });
        };

        let error = api_error.error;
        let field = error
            .details
            .as_ref()
            .and_then(|d| d.get("field"))
            .and_then(serde_json::Value::as_str);

        match (status, error.code.as_str(), field) {
            (_, "validation_error", Some(field)) => Err(ClientError::Validation {
                field: field.to_string(),
                message: error.message,
            }),
            (StatusCode::NOT_FOUND, _, _) => Err(ClientError::NotFound {
                message: error.message,
            }),
            _ => Err(ClientError::Api {
                code: error.code,
                message: error.message,
                status: status.as_u16(),
            }),
        }
    }
}

/// Query-string pairs for a listing search. Absent filters are omitted.
fn query_params(query: &ListingQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(7);
    if let Some(category) = query.category {
        params.push(("category", category.to_string()));
    }
    if let Some(animal_type) = query.animal_type {
        params.push(("animalType", animal_type.to_string()));
    }
    if let Some(city) = &query.city {
        params.push(("city", city.clone()));
    }
    if let Some(text) = &query.search_text {
        params.push(("q", text.clone()));
    }
    params.push(("sort", query.sort.to_string()));
    params.push(("page", query.page.to_string()));
    params.push(("pageSize", query.page_size.to_string()));
    params
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 10).
    pub timeout_seconds: u64,
    /// Paging bounds for the local fallback; should match the service's.
    pub page_limits: PageLimits,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            page_limits: PageLimits::default(),
        }
    }
}
