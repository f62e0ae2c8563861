//! Search input/output types for the repository contract.

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: u32 = 15;

/// Sort direction for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl core::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// Paginated, filtered, sorted query input.
///
/// Inputs are normalized on construction: a zero page or page size falls back to the
/// defaults (page 1, 15 items per page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    page: u32,
    per_page: u32,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            sort_dir: None,
            filter: None,
        }
    }
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = if page == 0 { DEFAULT_PAGE } else { page };
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = if per_page == 0 { DEFAULT_PER_PAGE } else { per_page };
        self
    }

    /// Sort by a field; direction defaults to ascending unless overridden.
    pub fn with_sort(mut self, field: impl Into<String>, dir: SortDirection) -> Self {
        self.sort = Some(field.into());
        self.sort_dir = Some(dir);
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Row offset of the first item on the requested page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

/// One page of search results plus the applied query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<E> {
    pub items: Vec<E>,
    pub total: u64,
    pub current_page: u32,
    pub per_page: u32,
    pub sort: Option<String>,
    pub sort_dir: Option<SortDirection>,
    pub filter: Option<String>,
}

impl<E> SearchResult<E> {
    /// Bundle a page of items with the parameters that produced it.
    pub fn new(items: Vec<E>, total: u64, params: &SearchParams) -> Self {
        Self {
            items,
            total,
            current_page: params.page(),
            per_page: params.per_page(),
            sort: params.sort().map(str::to_string),
            sort_dir: params.sort_dir(),
            filter: params.filter().map(str::to_string),
        }
    }

    /// Last page number for the total count (zero items means a single empty page).
    pub fn last_page(&self) -> u32 {
        let per_page = u64::from(self.per_page.max(1));
        let pages = self.total.div_ceil(per_page).max(1);
        pages.try_into().unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_inputs_fall_back_to_defaults() {
        let params = SearchParams::new().with_page(0).with_per_page(0);
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 15);
    }

    #[test]
    fn offset_is_zero_based_from_the_first_page() {
        let params = SearchParams::new().with_page(3).with_per_page(10);
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn last_page_rounds_up() {
        let params = SearchParams::new().with_per_page(15);
        let result: SearchResult<()> = SearchResult::new(vec![], 31, &params);
        assert_eq!(result.last_page(), 3);

        let empty: SearchResult<()> = SearchResult::new(vec![], 0, &params);
        assert_eq!(empty.last_page(), 1);
    }

    #[test]
    fn result_echoes_the_applied_parameters() {
        let params = SearchParams::new()
            .with_page(2)
            .with_sort("name", SortDirection::Desc)
            .with_filter("movie");
        let result = SearchResult::new(vec![1, 2, 3], 18, &params);

        assert_eq!(result.current_page, 2);
        assert_eq!(result.sort.as_deref(), Some("name"));
        assert_eq!(result.sort_dir, Some(SortDirection::Desc));
        assert_eq!(result.filter.as_deref(), Some("movie"));
    }
}
