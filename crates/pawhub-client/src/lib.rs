//! PawHub Client SDK.
//!
//! This crate provides a client library for front ends that read and write
//! PawHub listings over the HTTP API.
//!
//! # Example
//!
//! ```no_run
//! use pawhub_client::PawhubClient;
//! use pawhub_core::{Category, ListingQuery, SortOrder};
//!
//! # async fn example() -> Result<(), pawhub_client::ClientError> {
//! let client = PawhubClient::new("http://localhost:8080")?;
//!
//! let query = ListingQuery::new()
//!     .with_category(Category::Adoption)
//!     .with_sort(SortOrder::Oldest);
//! let page = client.list_listings(&query).await?;
//!
//! println!(
//!     "{} listings over {} pages",
//!     page.total_count,
//!     page.total_pages(query.page_size)
//! );
//! # Ok(())
//! # }
//! ```
//!
//! When the service is unreachable, [`PawhubClient::list_listings_or_local`]
//! runs the same query over a locally held collection instead of failing.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, PawhubClient};
pub use error::ClientError;
pub use types::DeleteResponse;
