//! Page planning for page-number pagination with a result ceiling

use std::ops::RangeInclusive;

/// Hard cap on results retrievable for a single search query
pub const PLATFORM_RESULT_CEILING: u64 = 1000;

/// Largest page size the search API accepts
pub const MAX_PER_PAGE: u32 = 100;

/// How a result set of known size is split into pages.
///
/// Pages are numbered from 1. Page 1 is always the discovery request, so
/// only pages `2..=page_count` are left to fetch once the total is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    total: u64,
    per_page: u32,
}

impl PagePlan {
    /// Plan the pages for a reported total.
    ///
    /// The effective total is `min(total_count, max_results, ceiling)`.
    pub fn new(total_count: u64, per_page: u32, max_results: u32) -> Self {
        let total = total_count
            .min(u64::from(max_results))
            .min(PLATFORM_RESULT_CEILING);

        Self {
            total,
            per_page: per_page.max(1),
        }
    }

    /// Effective number of records this plan covers
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Page size used by the plan
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of pages needed, `ceil(total / per_page)`
    pub fn page_count(&self) -> u32 {
        self.total.div_ceil(u64::from(self.per_page)) as u32
    }

    /// Pages still to fetch after the discovery page
    pub fn remaining_pages(&self) -> RangeInclusive<u32> {
        2..=self.page_count()
    }

    /// Maximum number of records `page` may contribute
    pub fn page_capacity(&self, page: u32) -> usize {
        if page == 0 {
            return 0;
        }
        let before = u64::from(page - 1) * u64::from(self.per_page);
        self.total
            .saturating_sub(before)
            .min(u64::from(self.per_page)) as usize
    }

    /// Trim a page's records to its capacity
    pub fn cap<T>(&self, page: u32, mut records: Vec<T>) -> Vec<T> {
        records.truncate(self.page_capacity(page));
        records
    }
}
