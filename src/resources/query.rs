//! Pagination, sorting and filter parameters for listing endpoints.

use std::fmt;
use url::form_urlencoded;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT_BY: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// A filter value. `Many` repeats the key once per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    One(String),
    Many(Vec<String>),
}

/// Listing parameters. Unset fields fall back to page 1, page size 10,
/// sorted by `id` descending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
    /// Extra filters, appended in insertion order.
    pub filters: Vec<(String, FilterValue)>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    #[must_use]
    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    #[must_use]
    pub fn sort_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = Some(direction);
        self
    }

    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters
            .push((key.into(), FilterValue::One(value.into())));
        self
    }

    #[must_use]
    pub fn filter_all<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.filters.push((key.into(), FilterValue::Many(values)));
        self
    }

    /// Encodes the parameters as a query string. `size_key` names the page
    /// size parameter, which differs between endpoint families.
    pub(crate) fn to_query(&self, size_key: &str) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("page", &self.page.unwrap_or(DEFAULT_PAGE).to_string());
        query.append_pair(
            size_key,
            &self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).to_string(),
        );
        query.append_pair("sort_by", self.sort_by.as_deref().unwrap_or(DEFAULT_SORT_BY));
        query.append_pair(
            "sort_direction",
            &self.sort_direction.unwrap_or_default().to_string(),
        );

        for (key, value) in &self.filters {
            match value {
                FilterValue::One(value) => {
                    query.append_pair(key, value);
                }
                FilterValue::Many(values) => {
                    for value in values {
                        query.append_pair(key, value);
                    }
                }
            }
        }

        query.finish()
    }
}

/// Percent-encodes a caller-supplied value for use as one path segment, so
/// `/`, `?`, `#` and spaces cannot change the request target.
pub(crate) fn segment(value: &str) -> String {
    // byte_serialize writes spaces as `+` and escapes a literal `+` as `%2B`.
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Appends `pairs` to `path` as a query string, leaving `path` untouched
/// when there are none.
pub(crate) fn with_query(path: &str, pairs: &[(&str, &str)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("{}?{}", path, query)
}
