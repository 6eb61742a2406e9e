//! Pagination module
//!
//! # Overview
//!
//! The search API uses page-number pagination and never serves more than
//! 1000 results for one query. Once the first page reports the total, every
//! remaining page is known up front, so the pages can be requested
//! independently instead of following a cursor.

mod plan;

pub use plan::{PagePlan, MAX_PER_PAGE, PLATFORM_RESULT_CEILING};
