//! Page arithmetic for list endpoints
//!
//! Requested page numbers are forgiving: anything that isn't an integer
//! means the first page and anything out of range means the last one, so a
//! client can never page itself into an error.

/// Page size used when the client doesn't send a usable `limit`
pub const DEFAULT_PER_PAGE: i64 = 10;

/// One resolved page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based number of the page actually returned
    pub number: i64,
    /// Rows to skip
    pub offset: i64,
    /// Rows to take
    pub limit: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Splits `total_count` rows into pages of `per_page`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    total_count: i64,
    per_page: i64,
}

impl Paginator {
    pub fn new(total_count: i64, per_page: i64) -> Self {
        Self {
            total_count: total_count.max(0),
            per_page: per_page.max(1),
        }
    }

    /// Number of pages; an empty listing still has one (empty) page
    pub fn total_pages(&self) -> i64 {
        if self.total_count == 0 {
            return 1;
        }
        (self.total_count - 1) / self.per_page + 1
    }

    /// Resolves a page number, falling back to the last page when it is
    /// out of range
    pub fn page(&self, requested: i64) -> Page {
        let total_pages = self.total_pages();
        let number = if (1..=total_pages).contains(&requested) {
            requested
        } else {
            total_pages
        };

        Page {
            number,
            offset: (number - 1) * self.per_page,
            limit: self.per_page,
            total_pages,
            total_count: self.total_count,
            has_next: number < total_pages,
            has_previous: number > 1,
        }
    }

    /// Resolves a page number sent as query text
    pub fn page_from_query(&self, requested: Option<&str>) -> Page {
        self.page(parse_page_number(requested))
    }
}

/// Parses a page number, defaulting to 1 when absent or not an integer
pub fn parse_page_number(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok()).unwrap_or(1)
}

/// Parses a page size, defaulting when absent or not an integer
///
/// There is no upper bound; sizes below 1 become 1.
pub fn parse_per_page(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .map(|limit| limit.max(1))
        .unwrap_or(DEFAULT_PER_PAGE)
}
