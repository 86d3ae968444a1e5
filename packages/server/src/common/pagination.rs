//! Page-number pagination for admin review screens.
//!
//! # Usage
//!
//! ```rust,ignore
//! let args = PageArgs { page: Some(0), size: Some(20) }.validate();
//!
//! let (rows, total) = tokio::try_join!(
//!     Model::find_page(&args, pool),
//!     Model::count(pool),
//! )?;
//!
//! let page = Page::new(rows, total, &args);
//! ```

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

// ============================================================================
// Arguments
// ============================================================================

/// Caller-controlled page index (0-based) and page size.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageArgs {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl PageArgs {
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
        }
    }

    /// Apply defaults and bounds: page >= 0, size in 1..=100 (default 20).
    pub fn validate(&self) -> ValidatedPageArgs {
        ValidatedPageArgs {
            page: self.page.unwrap_or(0).max(0),
            size: self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedPageArgs {
    pub page: i64,
    pub size: i64,
}

impl ValidatedPageArgs {
    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.size
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

// ============================================================================
// Page
// ============================================================================

/// One page of rows plus the total under the same filter.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page: i64,
    pub size: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: i64, args: &ValidatedPageArgs) -> Self {
        let total_pages = total_pages(total_count, args.size);
        Self {
            items,
            total_count,
            page: args.page,
            size: args.size,
            total_pages,
            has_next_page: args.page.saturating_add(1) < total_pages,
        }
    }
}

/// Number of pages needed for `total` rows.
pub fn total_pages(total: i64, size: i64) -> i64 {
    if total <= 0 || size <= 0 {
        return 0;
    }
    (total + size - 1) / size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = PageArgs::default().validate();
        assert_eq!(args.page, 0);
        assert_eq!(args.size, 20);
        assert_eq!(args.offset(), 0);
    }

    #[test]
    fn test_clamps() {
        let args = PageArgs::new(-3, 500).validate();
        assert_eq!(args.page, 0);
        assert_eq!(args.size, MAX_PAGE_SIZE);

        let args = PageArgs::new(2, 0).validate();
        assert_eq!(args.size, 1);
        assert_eq!(args.offset(), 2);
    }

    #[test]
    fn test_offset() {
        let args = PageArgs::new(3, 20).validate();
        assert_eq!(args.limit(), 20);
        assert_eq!(args.offset(), 60);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
    }

    #[test]
    fn test_page_has_next() {
        let args = PageArgs::new(0, 20).validate();
        let page = Page::new(vec![1; 20], 45, &args);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next_page);

        let args = PageArgs::new(2, 20).validate();
        let page = Page::new(vec![1; 5], 45, &args);
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_huge_page_index() {
        let args = PageArgs::new(i64::MAX, 20).validate();
        assert_eq!(args.offset(), i64::MAX);

        let page: Page<i32> = Page::new(vec![], 0, &args);
        assert!(!page.has_next_page);

        let page: Page<i32> = Page::new(vec![], 45, &args);
        assert!(!page.has_next_page);
    }
}
