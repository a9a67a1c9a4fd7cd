//! Page-number pagination primitives shared by Ops360 console endpoints.
//!
//! List endpoints accept `page` and `limit` query parameters and answer with
//! an envelope carrying the current window plus `total` and `totalPages`.
//! This crate owns the arithmetic so every screen agrees on window bounds,
//! page clamping, and the compact page-control rendering.
//!
//! ## Invariants
//! - Page numbers are 1-based and never leave `[1, total_pages]`.
//! - `limit` is strictly positive.
//! - A window for page `p` covers records `(p-1)*limit + 1 ..= min(p*limit, total)`
//!   (1-based, inclusive).

use serde::{Deserialize, Serialize};

/// Errors produced when constructing or clamping page requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Page numbers are 1-based; zero is never valid.
    #[error("page numbers start at 1")]
    ZeroPage,
    /// A zero limit would make every window empty.
    #[error("page limit must be at least 1")]
    ZeroLimit,
    /// The requested page lies beyond the last available page.
    #[error("page {page} is outside [1, {total_pages}]")]
    PageOutOfRange {
        /// Requested page number.
        page: u32,
        /// Last valid page for the collection.
        total_pages: u32,
    },
}

/// Number of pages needed to show `total` records `limit` at a time.
///
/// Empty collections still occupy one (empty) page so that page numbers
/// always have a valid range to live in.
///
/// # Examples
/// ```
/// assert_eq!(pagination::total_pages(42, 15), 3);
/// assert_eq!(pagination::total_pages(0, 15), 1);
/// ```
#[must_use]
pub fn total_pages(total: u64, limit: u32) -> u32 {
    let limit = u64::from(limit.max(1));
    let pages = total.div_ceil(limit).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// A validated `page`/`limit` pair for a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

/// Default window size used by list screens.
pub const DEFAULT_LIMIT: u32 = 15;

impl PageRequest {
    /// Construct a request, rejecting zero pages and zero limits.
    pub fn new(page: u32, limit: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        Ok(Self { page, limit })
    }

    /// The first page with the given window size.
    pub fn first(limit: u32) -> Result<Self, PaginationError> {
        Self::new(1, limit)
    }

    /// Requested page number (1-based).
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Window size.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Reject requests beyond the last available page.
    pub fn ensure_within(&self, total_pages: u32) -> Result<(), PaginationError> {
        if self.page > total_pages {
            return Err(PaginationError::PageOutOfRange {
                page: self.page,
                total_pages,
            });
        }
        Ok(())
    }

    /// The next page, or `None` when already on the last page.
    #[must_use]
    pub fn next(&self, total_pages: u32) -> Option<Self> {
        if self.page >= total_pages {
            return None;
        }
        Some(Self {
            page: self.page + 1,
            limit: self.limit,
        })
    }

    /// The previous page, or `None` when already on the first page.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        if self.page <= 1 {
            return None;
        }
        Some(Self {
            page: self.page - 1,
            limit: self.limit,
        })
    }

    /// Query-string pairs for the wire request.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }

    /// 1-based inclusive record window this page covers within `total`
    /// records, or `None` when the page starts beyond the collection.
    #[must_use]
    pub fn record_range(&self, total: u64) -> Option<RecordRange> {
        let limit = u64::from(self.limit);
        let start = u64::from(self.page - 1) * limit + 1;
        if start > total {
            return None;
        }
        let end = (u64::from(self.page) * limit).min(total);
        Some(RecordRange { start, end })
    }
}

/// 1-based inclusive record bounds shown as "start to end of total".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordRange {
    /// First record on the page.
    pub start: u64,
    /// Last record on the page.
    pub end: u64,
}

/// Paginated list envelope returned by Ops360 list endpoints.
///
/// One endpoint historically keyed the list by resource name rather than
/// `items`; the aliases keep both decodable while `items` stays canonical
/// on the way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    /// Server-side success flag carried by the legacy envelope shape.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Current page number (1-based).
    pub page: u32,
    /// Window size the server applied.
    pub limit: u32,
    /// Total records across every page.
    pub total: u64,
    /// Total pages across the collection.
    pub total_pages: u32,
    /// Records on the current page.
    #[serde(alias = "customers")]
    pub items: Vec<T>,
}

fn default_success() -> bool {
    true
}

impl<T> PageEnvelope<T> {
    /// True when the whole collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Recompute the page count from `total` and `limit`, independent of the
    /// server-provided figure.
    #[must_use]
    pub fn computed_total_pages(&self) -> u32 {
        total_pages(self.total, self.limit)
    }
}

/// One slot in the compact page-control strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    /// A selectable page number.
    Page(u32),
    /// A run of elided pages.
    Gap,
}

/// Compact page-control strip: first page, last page, current page and its
/// direct neighbours; elided runs collapse into a single gap marker.
///
/// # Examples
/// ```
/// use pagination::PageControl;
///
/// let strip = pagination::page_controls(5, 9);
/// assert_eq!(
///     strip,
///     vec![
///         PageControl::Page(1),
///         PageControl::Gap,
///         PageControl::Page(4),
///         PageControl::Page(5),
///         PageControl::Page(6),
///         PageControl::Gap,
///         PageControl::Page(9),
///     ],
/// );
/// ```
#[must_use]
pub fn page_controls(page: u32, total_pages: u32) -> Vec<PageControl> {
    let mut strip = Vec::new();
    let mut in_gap = false;
    for number in 1..=total_pages {
        let visible =
            number == 1 || number == total_pages || number.abs_diff(page) <= 1;
        if visible {
            strip.push(PageControl::Page(number));
            in_gap = false;
        } else if !in_gap {
            strip.push(PageControl::Gap);
            in_gap = true;
        }
    }
    strip
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(42, 15, 3)]
    #[case(45, 15, 3)]
    #[case(46, 15, 4)]
    #[case(1, 15, 1)]
    #[case(0, 15, 1)]
    #[case(15, 15, 1)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] limit: u32, #[case] expected: u32) {
        assert_eq!(total_pages(total, limit), expected);
    }

    #[rstest]
    fn third_page_of_42_covers_the_tail() {
        let request = PageRequest::new(3, 15).expect("valid request");
        let range = request.record_range(42).expect("page within collection");
        assert_eq!(range.start, 31);
        assert_eq!(range.end, 42);
    }

    #[rstest]
    #[case(1, 1, 15)]
    #[case(2, 16, 30)]
    fn earlier_pages_cover_full_windows(
        #[case] page: u32,
        #[case] start: u64,
        #[case] end: u64,
    ) {
        let request = PageRequest::new(page, 15).expect("valid request");
        let range = request.record_range(42).expect("page within collection");
        assert_eq!(range.start, start);
        assert_eq!(range.end, end);
    }

    #[rstest]
    fn pages_beyond_the_collection_have_no_window() {
        let request = PageRequest::new(4, 15).expect("valid request");
        assert_eq!(request.record_range(42), None);
    }

    #[rstest]
    #[case(0, 15, PaginationError::ZeroPage)]
    #[case(1, 0, PaginationError::ZeroLimit)]
    fn invalid_requests_are_rejected(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected: PaginationError,
    ) {
        let err = PageRequest::new(page, limit).expect_err("must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn navigation_never_leaves_the_valid_range() {
        let pages = total_pages(42, 15);
        let first = PageRequest::new(1, 15).expect("valid request");
        assert_eq!(first.previous(), None);

        let last = PageRequest::new(3, 15).expect("valid request");
        assert_eq!(last.next(pages), None);

        let middle = first.next(pages).expect("second page exists");
        assert_eq!(middle.page(), 2);
        assert!(middle.ensure_within(pages).is_ok());

        let beyond = PageRequest::new(4, 15).expect("valid request");
        assert_eq!(
            beyond.ensure_within(pages).expect_err("out of range"),
            PaginationError::PageOutOfRange {
                page: 4,
                total_pages: 3,
            },
        );
    }

    #[rstest]
    fn envelope_accepts_the_resource_named_list_key() {
        let body = r#"{
            "success": true,
            "page": 1,
            "limit": 15,
            "total": 2,
            "totalPages": 1,
            "customers": [1, 2]
        }"#;
        let envelope: PageEnvelope<u32> =
            serde_json::from_str(body).expect("legacy key should decode");
        assert_eq!(envelope.items, vec![1, 2]);
        assert_eq!(envelope.computed_total_pages(), 1);
    }

    #[rstest]
    fn envelope_defaults_success_when_absent() {
        let body = r#"{
            "page": 1,
            "limit": 15,
            "total": 0,
            "totalPages": 1,
            "items": []
        }"#;
        let envelope: PageEnvelope<u32> = serde_json::from_str(body).expect("should decode");
        assert!(envelope.success);
        assert!(envelope.is_empty());
    }

    #[rstest]
    fn short_strips_have_no_gaps() {
        let strip = page_controls(2, 3);
        assert_eq!(
            strip,
            vec![
                PageControl::Page(1),
                PageControl::Page(2),
                PageControl::Page(3),
            ],
        );
    }

    #[rstest]
    fn query_pairs_carry_page_and_limit() {
        let request = PageRequest::new(3, 15).expect("valid request");
        let pairs = request.query_pairs();
        assert_eq!(pairs[0], ("page", "3".to_owned()));
        assert_eq!(pairs[1], ("limit", "15".to_owned()));
    }
}
