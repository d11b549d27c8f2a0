//! Core types and the listing query engine for PawHub.
//!
//! This crate provides the foundational types shared by the service and the
//! client SDK:
//!
//! - **Identifiers**: `ListingId`
//! - **Listings**: `Listing`, `ListingDraft`, `ListingPatch`, `Category`,
//!   `AnimalType`, `ListingStatus`
//! - **Queries**: `ListingQuery`, `PageLimits`, `SortOrder`, `run_query`
//! - **Pages**: `Page`, `paginate`
//!
//! # Query pipeline
//!
//! A query is always evaluated as filter, then count, then stable sort, then
//! slice. The engine is a pure function of the collection and the query, so the
//! service and any client-side fallback produce identical pages.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod clock;
pub mod error;
pub mod ids;
pub mod listing;
pub mod page;
pub mod query;

pub use clock::MonotonicClock;
pub use error::ValidationError;
pub use ids::{IdError, ListingId};
pub use listing::{
    AnimalType, Category, Listing, ListingDraft, ListingPatch, ListingStatus, MAX_TITLE_CHARS,
};
pub use page::{
    paginate, Page, BLOG_PAGE_SIZE, CLASSIFIEDS_PAGE_SIZE, MAX_PAGE_SIZE, NEWS_PAGE_SIZE,
};
pub use query::{run_query, ListingQuery, PageLimits, SortOrder};
