use serde::Serialize;

/// Page size used when the client does not ask for one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 15;
/// Upper bound on the page size a client may request.
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// Offset pagination requested by a caller (1-based page).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Normalise raw request values: page defaults to 1, page size to
    /// [`DEFAULT_ITEMS_PER_PAGE`] and is clamped to `1..=MAX_ITEMS_PER_PAGE`.
    pub fn from_request(page: Option<usize>, per_page: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
                .clamp(1, MAX_ITEMS_PER_PAGE),
        }
    }

    /// Rows to skip. Saturates for page numbers past any real table, which
    /// simply yields an empty page.
    pub fn offset(&self) -> i64 {
        let skipped = self.page.saturating_sub(1).saturating_mul(self.per_page);
        i64::try_from(skipped).unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::from_request(None, None)
    }
}

/// One page of results plus the metadata clients need to walk the rest.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub current_page: usize,
    pub per_page: usize,
    pub total: usize,
    pub last_page: usize,
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, pagination: Pagination, total: usize) -> Self {
        Self {
            current_page: pagination.page,
            per_page: pagination.per_page,
            total,
            last_page: total.div_ceil(pagination.per_page).max(1),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_request_applies_defaults_and_bounds() {
        assert_eq!(
            Pagination::from_request(None, None),
            Pagination {
                page: 1,
                per_page: DEFAULT_ITEMS_PER_PAGE
            }
        );
        assert_eq!(Pagination::from_request(Some(0), Some(0)).per_page, 1);
        assert_eq!(Pagination::from_request(Some(0), Some(0)).page, 1);
        assert_eq!(
            Pagination::from_request(Some(2), Some(10_000)).per_page,
            MAX_ITEMS_PER_PAGE
        );
    }

    #[test]
    fn offset_skips_previous_pages() {
        let pagination = Pagination::from_request(Some(3), Some(20));
        assert_eq!(pagination.offset(), 40);
        assert_eq!(pagination.limit(), 20);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        let pagination = Pagination::from_request(Some(usize::MAX), Some(MAX_ITEMS_PER_PAGE));
        assert_eq!(pagination.offset(), i64::MAX);
        assert_eq!(Pagination::from_request(Some(0), None).offset(), 0);
    }

    #[test]
    fn paginated_reports_last_page() {
        let page = Paginated::new(vec![1, 2], Pagination::from_request(Some(1), Some(2)), 5);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.total, 5);

        let empty: Paginated<i32> = Paginated::new(Vec::new(), Pagination::default(), 0);
        assert_eq!(empty.last_page, 1);
    }
}
