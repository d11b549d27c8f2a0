//! Query-string parsing for listing searches.
//!
//! Raw query-string values arrive as strings and are turned into a validated
//! [`ListingQuery`] exactly once, here. Numeric fields never fail: they fall
//! back to defaults and are clamped into range. Enum filters are checked for
//! membership; `ALL` or an empty value means "no filter".

use serde::Deserialize;

use pawhub_core::{ListingQuery, PageLimits, SortOrder, ValidationError};

/// Raw listing search parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    /// Category filter.
    pub category: Option<String>,
    /// Animal type filter.
    pub animal_type: Option<String>,
    /// City substring.
    pub city: Option<String>,
    /// Free-text search.
    pub q: Option<String>,
    /// Sort order.
    pub sort: Option<String>,
    /// 1-based page number.
    pub page: Option<String>,
    /// Items per page.
    pub page_size: Option<String>,
}

impl ListingParams {
    /// Validate and convert into a [`ListingQuery`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `category` or `animalType` names an
    /// unknown value.
    pub fn into_query(self, limits: PageLimits) -> Result<ListingQuery, ValidationError> {
        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1);

        // Negative sizes become 0 here and 1 after normalizing.
        let page_size = self
            .page_size
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .map_or(limits.default_page_size, |size| {
                usize::try_from(size.max(0)).unwrap_or(usize::MAX)
            });

        let query = ListingQuery {
            category: enum_filter(self.category.as_deref())?,
            animal_type: enum_filter(self.animal_type.as_deref())?,
            city: non_blank(self.city),
            search_text: non_blank(self.q),
            sort: self
                .sort
                .as_deref()
                .map_or(SortOrder::Newest, SortOrder::from_param),
            page,
            page_size,
        };
        Ok(query.normalized(limits))
    }
}

fn enum_filter<T>(value: Option<&str>) -> Result<Option<T>, ValidationError>
where
    T: std::str::FromStr<Err = ValidationError>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawhub_core::{AnimalType, Category};

    const LIMITS: PageLimits = PageLimits {
        default_page_size: 12,
        max_page_size: 100,
    };

    fn params(pairs: &[(&str, &str)]) -> ListingParams {
        let mut p = ListingParams::default();
        for (key, value) in pairs {
            let value = Some((*value).to_string());
            match *key {
                "category" => p.category = value,
                "animalType" => p.animal_type = value,
                "city" => p.city = value,
                "q" => p.q = value,
                "sort" => p.sort = value,
                "page" => p.page = value,
                "pageSize" => p.page_size = value,
                other => panic!("unknown param {other}"),
            }
        }
        p
    }

    #[test]
    fn empty_params_use_defaults() {
        let query = ListingParams::default().into_query(LIMITS).unwrap();
        assert_eq!(query, ListingQuery::new());
    }

    #[test]
    fn parses_all_fields() {
        let query = params(&[
            ("category", "marketplace"),
            ("animalType", "CAT"),
            ("city", "Дархан"),
            ("q", "хаски"),
            ("sort", "price_asc"),
            ("page", "3"),
            ("pageSize", "6"),
        ])
        .into_query(LIMITS)
        .unwrap();

        assert_eq!(query.category, Some(Category::Marketplace));
        assert_eq!(query.animal_type, Some(AnimalType::Cat));
        assert_eq!(query.city.as_deref(), Some("Дархан"));
        assert_eq!(query.search_text.as_deref(), Some("хаски"));
        assert_eq!(query.sort, SortOrder::PriceAsc);
        assert_eq!(query.page, 3);
        assert_eq!(query.page_size, 6);
    }

    #[test]
    fn numeric_garbage_falls_back_to_defaults() {
        let query = params(&[("page", "two"), ("pageSize", "lots")])
            .into_query(LIMITS)
            .unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 12);
    }

    #[test]
    fn numeric_values_are_clamped() {
        let query = params(&[("page", "-4"), ("pageSize", "0")])
            .into_query(LIMITS)
            .unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 1);

        let query = params(&[("pageSize", "5000")]).into_query(LIMITS).unwrap();
        assert_eq!(query.page_size, 100);
    }

    #[test]
    fn all_and_blank_mean_no_filter() {
        let query = params(&[("category", "ALL"), ("animalType", " "), ("city", "")])
            .into_query(LIMITS)
            .unwrap();
        assert_eq!(query.category, None);
        assert_eq!(query.animal_type, None);
        assert_eq!(query.city, None);
    }

    #[test]
    fn unknown_enum_is_rejected() {
        let err = params(&[("category", "PETS")]).into_query(LIMITS).unwrap_err();
        assert_eq!(err.field, "category");

        let err = params(&[("animalType", "dragon")]).into_query(LIMITS).unwrap_err();
        assert_eq!(err.field, "animalType");
    }

    #[test]
    fn unknown_sort_is_newest() {
        let query = params(&[("sort", "random")]).into_query(LIMITS).unwrap();
        assert_eq!(query.sort, SortOrder::Newest);
    }
}
