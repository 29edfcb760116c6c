//! Page arithmetic for public listing and search.

use crate::constants::PAGE_SIZE;

/// A 1-based page request with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: usize,
}

impl Pagination {
    /// Page `page` at the default [`PAGE_SIZE`]. Page 0 is treated as page 1.
    pub fn new(page: u32) -> Self {
        Self::with_page_size(page, PAGE_SIZE)
    }

    pub fn with_page_size(page: u32, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Rows skipped before this page: `(page - 1) * page_size`.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.page_size)
    }

    /// Maximum rows on this page.
    pub fn limit(&self) -> usize {
        self.page_size
    }

    /// `ceil(total / page_size)`; zero when nothing matches.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.page_size as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_page_number() {
        assert_eq!(Pagination::new(1).offset(), 0);
        assert_eq!(Pagination::new(2).offset(), 20);
        assert_eq!(Pagination::new(3).offset(), 40);
        assert_eq!(Pagination::with_page_size(4, 5).offset(), 15);
    }

    #[test]
    fn page_zero_is_page_one() {
        let page = Pagination::new(0);
        assert_eq!(page.page(), 1);
        assert_eq!(page.offset(), 0);
        assert_eq!(page, Pagination::default());
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Pagination::new(1);
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(1), 1);
        assert_eq!(page.total_pages(20), 1);
        assert_eq!(page.total_pages(21), 2);
        assert_eq!(page.total_pages(45), 3);
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let page = Pagination::new(u32::MAX);
        assert!(page.offset() > 0);
        assert_eq!(page.limit(), PAGE_SIZE);
    }
}
