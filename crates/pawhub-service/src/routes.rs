//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, listings};
use crate::state::AppState;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `GET /v1/listings` - Search listings (`category`, `animalType`, `city`, `q`, `sort`,
///   `page`, `pageSize`)
/// - `POST /v1/listings` - Create a listing
/// - `GET /v1/listings/:id` - Get a listing
/// - `PATCH /v1/listings/:id` - Update a listing
/// - `DELETE /v1/listings/:id` - Delete a listing
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    Router::new()
        .route("/health", get(health::health))
        .route(
            "/v1/listings",
            get(listings::list_listings).post(listings::create_listing),
        )
        .route(
            "/v1/listings/:id",
            get(listings::get_listing)
                .patch(listings::update_listing)
                .delete(listings::delete_listing),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
