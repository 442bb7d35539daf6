//! Page-count arithmetic for the inventory feed.
//!
//! The page count is derived once from the first page and then used as the
//! loop bound. A feed whose page size varies between calls can make this
//! estimate diverge from the pages actually available; the first-page
//! estimate is kept as-is.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    pub total_records: u64,
    pub per_page: usize,
    pub page_count: u64,
}

impl PagePlan {
    pub fn from_first_page(total_records: u64, per_page: usize) -> Self {
        Self {
            total_records,
            per_page,
            page_count: page_count(total_records, per_page),
        }
    }

    /// Page indexes still to fetch after page 0, ascending.
    pub fn remaining_pages(&self) -> Range<u64> {
        1..self.page_count.max(1)
    }
}

/// `ceil(total / per_page)`; an empty first page means page 0 is the only page.
pub fn page_count(total_records: u64, per_page: usize) -> u64 {
    if per_page == 0 {
        return 1;
    }
    total_records.div_ceil(per_page as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(3, 2, 2)]
    #[case(4, 2, 2)]
    #[case(5, 2, 3)]
    #[case(1, 25, 1)]
    #[case(0, 25, 0)]
    #[case(10, 0, 1)]
    fn test_page_count(#[case] total: u64, #[case] per_page: usize, #[case] expected: u64) {
        assert_eq!(page_count(total, per_page), expected);
    }

    #[test]
    fn test_remaining_pages() {
        assert_eq!(PagePlan::from_first_page(3, 2).remaining_pages(), 1..2);
        assert!(PagePlan::from_first_page(2, 2).remaining_pages().is_empty());
        assert!(PagePlan::from_first_page(0, 2).remaining_pages().is_empty());
        assert!(PagePlan::from_first_page(7, 0).remaining_pages().is_empty());
    }
}
