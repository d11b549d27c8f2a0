//! PawHub HTTP API Service.
//!
//! This crate provides the HTTP API for PawHub classifieds:
//!
//! - Listing search with filtering, sorting and pagination
//! - Listing create / read / update / delete
//! - Health check
//!
//! Query semantics live in [`pawhub_core::run_query`]; this crate only parses
//! request input into a validated [`pawhub_core::ListingQuery`] and maps errors
//! to HTTP responses.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers over the sync store are still async

pub mod config;
pub mod error;
pub mod handlers;
pub mod params;
pub mod routes;
pub mod seed;
pub mod state;

pub use config::{ServiceConfig, StoreBackend};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
