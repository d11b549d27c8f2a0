//! Application state.

use std::sync::Arc;

use pawhub_core::{MonotonicClock, PageLimits};
use pawhub_store::Store;

use crate::config::ServiceConfig;

/// Application state shared across handlers.
pub struct AppState {
    /// The storage backend.
    pub store: Arc<dyn Store>,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Source of `created_at` / `updated_at` timestamps.
    pub clock: MonotonicClock,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        Self {
            store,
            config,
            clock: MonotonicClock::new(),
        }
    }

    /// Page-size bounds for listing searches.
    #[must_use]
    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_page_size: self.config.default_page_size,
            max_page_size: self.config.max_page_size,
        }
    }
}
