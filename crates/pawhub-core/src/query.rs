//! The listing query engine.
//!
//! [`run_query`] turns a collection of listings and a [`ListingQuery`] into a
//! [`Page`]: filter, count, stable sort, slice, in that order. It never fails
//! and never mutates its input.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::page::{paginate, Page, CLASSIFIEDS_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::{AnimalType, Category, Listing};

/// Sort order for listing queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recently created first.
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
    /// Cheapest first; listings without a price count as free.
    PriceAsc,
    /// Most expensive first; listings without a price count as free.
    PriceDesc,
}

impl SortOrder {
    /// Wire name of the sort order.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }

    /// Parse a query-string value. Unrecognized values fall back to [`SortOrder::Newest`].
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "oldest" => Self::Oldest,
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            _ => Self::Newest,
        }
    }

    fn compare(self, a: &Listing, b: &Listing) -> Ordering {
        match self {
            Self::Newest => b.created_at.cmp(&a.created_at),
            Self::Oldest => a.created_at.cmp(&b.created_at),
            Self::PriceAsc => a.sort_price().cmp(&b.sort_price()),
            Self::PriceDesc => b.sort_price().cmp(&a.sort_price()),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated listing query.
///
/// Every filter is optional; an absent (or blank) filter places no constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// Exact category match.
    pub category: Option<Category>,
    /// Exact animal type match.
    pub animal_type: Option<AnimalType>,
    /// Case-insensitive substring of `location_city`.
    pub city: Option<String>,
    /// Case-insensitive substring of title, description, breed or any tag.
    pub search_text: Option<String>,
    /// Sort order.
    pub sort: SortOrder,
    /// 1-based page number. Pages below 1 are empty.
    pub page: i64,
    /// Items per page.
    pub page_size: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            category: None,
            animal_type: None,
            city: None,
            search_text: None,
            sort: SortOrder::Newest,
            page: 1,
            page_size: CLASSIFIEDS_PAGE_SIZE,
        }
    }
}

impl ListingQuery {
    /// Create a query with default sort and pagination and no filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Filter by animal type.
    #[must_use]
    pub fn with_animal_type(mut self, animal_type: AnimalType) -> Self {
        self.animal_type = Some(animal_type);
        self
    }

    /// Filter by city substring.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Filter by free-text search.
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    /// Set the sort order.
    #[must_use]
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Set page number and page size.
    #[must_use]
    pub fn with_page(mut self, page: i64, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Coerce paging into range: `page < 1` becomes 1 and `page_size` is
    /// clamped to `1..=limits.max_page_size`.
    ///
    /// The service applies this to every request, and the client applies it
    /// before falling back to local listings, so both produce the same page.
    #[must_use]
    pub fn normalized(mut self, limits: PageLimits) -> Self {
        self.page = self.page.max(1);
        self.page_size = self.page_size.clamp(1, limits.max_page_size.max(1));
        self
    }
}

/// Page-size bounds applied by [`ListingQuery::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Page size used when a request gives none.
    pub default_page_size: usize,
    /// Upper bound for page size.
    pub max_page_size: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: CLASSIFIEDS_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Run a query over a collection of listings.
///
/// Filters are combined with logical AND. `total_count` counts the filtered
/// set before pagination. Sorting is stable, so listings with equal keys keep
/// their order from `listings`.
#[must_use]
pub fn run_query(listings: &[Listing], query: &ListingQuery) -> Page<Listing> {
    let filter = Filter::new(query);

    let mut matched: Vec<&Listing> = listings.iter().filter(|l| filter.matches(l)).collect();
    matched.sort_by(|a, b| query.sort.compare(a, b));

    let page = paginate(matched, query.page, query.page_size);
    Page {
        items: page.items.into_iter().cloned().collect(),
        total_count: page.total_count,
    }
}

/// Filter predicates with text needles lowercased once per query.
struct Filter {
    category: Option<Category>,
    animal_type: Option<AnimalType>,
    city: Option<String>,
    search: Option<String>,
}

impl Filter {
    fn new(query: &ListingQuery) -> Self {
        Self {
            category: query.category,
            animal_type: query.animal_type,
            city: needle(query.city.as_deref()),
            search: needle(query.search_text.as_deref()),
        }
    }

    fn matches(&self, listing: &Listing) -> bool {
        self.category.map_or(true, |c| listing.category == c)
            && self.animal_type.map_or(true, |a| listing.animal_type == a)
            && self
                .city
                .as_deref()
                .map_or(true, |city| contains_ci(&listing.location_city, city))
            && self
                .search
                .as_deref()
                .map_or(true, |text| matches_search(listing, text))
    }
}

fn needle(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

// Tags are matched by substring, which includes an exact tag match.
fn matches_search(listing: &Listing, text: &str) -> bool {
    contains_ci(&listing.title, text)
        || contains_ci(&listing.description, text)
        || listing
            .breed
            .as_deref()
            .is_some_and(|breed| contains_ci(breed, text))
        || listing.tags.iter().any(|tag| contains_ci(tag, text))
}
