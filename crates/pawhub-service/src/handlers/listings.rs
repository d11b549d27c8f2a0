//! Listing handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use pawhub_core::{run_query, Listing, ListingDraft, ListingId, ListingPatch, Page};

use crate::error::ApiError;
use crate::params::ListingParams;
use crate::state::AppState;

/// Delete response.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Always true on success.
    pub deleted: bool,
    /// ID of the deleted listing.
    pub id: ListingId,
}

/// Search listings.
pub async fn list_listings(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListingParams>, QueryRejection>,
) -> Result<Json<Page<Listing>>, ApiError> {
    let Query(params) = params?;
    let query = params.into_query(state.page_limits())?;
    let listings = state.store.find_all()?;
    let page = run_query(&listings, &query);

    tracing::debug!(
        category = ?query.category,
        animal_type = ?query.animal_type,
        sort = %query.sort,
        page = query.page,
        page_size = query.page_size,
        total_count = page.total_count,
        returned = page.items.len(),
        "Listing search"
    );

    Ok(Json(page))
}

/// Get a single listing.
pub async fn get_listing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Listing>, ApiError> {
    let id = parse_id(&id)?;
    let listing = state
        .store
        .find_by_id(&id)?
        .ok_or_else(|| not_found(&id))?;

    Ok(Json(listing))
}

/// Create a listing.
pub async fn create_listing(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ListingDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Listing>), ApiError> {
    let Json(draft) = body?;

    let listing = Listing::create(draft, ListingId::generate(), state.clock.tick())?;
    state.store.insert(&listing)?;

    tracing::info!(
        id = %listing.id,
        category = %listing.category,
        animal_type = %listing.animal_type,
        "Listing created"
    );

    Ok((StatusCode::CREATED, Json(listing)))
}

/// Update a listing.
pub async fn update_listing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<ListingPatch>, JsonRejection>,
) -> Result<Json<Listing>, ApiError> {
    let id = parse_id(&id)?;
    let Json(patch) = body?;

    let current = state
        .store
        .find_by_id(&id)?
        .ok_or_else(|| not_found(&id))?;
    let updated = current.apply(patch, state.clock.tick())?;
    state.store.update(&updated)?;

    tracing::info!(id = %updated.id, status = ?updated.status, "Listing updated");

    Ok(Json(updated))
}

/// Delete a listing.
pub async fn delete_listing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&id)?;
    state.store.delete(&id)?;

    tracing::info!(%id, "Listing deleted");

    Ok(Json(DeleteResponse { deleted: true, id }))
}

/// A malformed ID can never match a listing, so it is reported as not found.
fn parse_id(raw: &str) -> Result<ListingId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Listing not found: {raw}")))
}

fn not_found(id: &ListingId) -> ApiError {
    ApiError::NotFound(format!("Listing not found: {id}"))
}
