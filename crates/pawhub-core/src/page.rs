//! Offset-based pagination.

use serde::{Deserialize, Serialize};

/// Default page size for classifieds.
pub const CLASSIFIEDS_PAGE_SIZE: usize = 12;

/// Default page size for blog posts.
pub const BLOG_PAGE_SIZE: usize = 6;

/// Default page size for news.
pub const NEWS_PAGE_SIZE: usize = 10;

/// Largest page size a caller may ask for.
pub const MAX_PAGE_SIZE: usize = 100;

/// One page of results plus the size of the whole result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,

    /// Number of items across all pages.
    pub total_count: usize,
}

impl<T> Page<T> {
    /// An empty page over an empty result set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }

    /// Number of pages needed to show `total_count` items, `page_size` at a time.
    ///
    /// A zero page size yields zero pages.
    #[must_use]
    pub fn total_pages(&self, page_size: usize) -> usize {
        if page_size == 0 {
            0
        } else {
            self.total_count.div_ceil(page_size)
        }
    }
}

/// Slice `items` down to the requested 1-based page.
///
/// The page covers `[(page - 1) * page_size, (page - 1) * page_size + page_size)`.
/// A page below 1, a zero page size or a page past the end all yield an empty
/// `items` list; `total_count` is always `items.len()` of the input.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: i64, page_size: usize) -> Page<T> {
    let total_count = items.len();

    let offset = page
        .checked_sub(1)
        .filter(|p| *p >= 0)
        .and_then(|p| usize::try_from(p).ok())
        .map(|p| p.saturating_mul(page_size));

    let items = match offset {
        Some(offset) if page_size > 0 && offset < total_count => {
            items.into_iter().skip(offset).take(page_size).collect()
        }
        _ => Vec::new(),
    };

    Page { items, total_count }
}
