//! Page windowing.

use crate::error::{AppError, Result};

/// Page number used when the request does not give one.
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when the request does not give one.
pub const DEFAULT_SIZE: i64 = 10;

/// Validated 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    /// Validate raw page parameters. Page is checked before size.
    pub fn new(page: i64, size: i64) -> Result<Self> {
        if page <= 0 {
            return Err(AppError::InvalidPage);
        }
        if size <= 0 {
            return Err(AppError::InvalidSize);
        }

        Ok(Self {
            page: page as u64,
            size: size as u64,
        })
    }

    /// Number of records per page.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Records skipped before the window.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.size)
    }

    /// Window an already ordered sequence in memory.
    pub fn apply<T>(&self, ordered: impl IntoIterator<Item = T>) -> Vec<T> {
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(self.size).unwrap_or(usize::MAX);
        ordered.into_iter().skip(offset).take(size).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_page_of_three() {
        let page = PageRequest::new(2, 3).unwrap();
        assert_eq!(page.offset(), 3);
        assert_eq!(
            page.apply(["A", "B", "C", "D", "E", "F"]),
            vec!["D", "E", "F"]
        );
    }

    #[test]
    fn rejects_non_positive_values() {
        assert!(matches!(PageRequest::new(0, 3), Err(AppError::InvalidPage)));
        assert!(matches!(PageRequest::new(-4, 3), Err(AppError::InvalidPage)));
        assert!(matches!(PageRequest::new(1, 0), Err(AppError::InvalidSize)));
        assert!(matches!(PageRequest::new(0, 0), Err(AppError::InvalidPage)));
    }

    #[test]
    fn partial_and_past_the_end_pages() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(PageRequest::new(3, 3).unwrap().apply(items.clone()), vec![7]);
        assert!(PageRequest::new(4, 3).unwrap().apply(items).is_empty());
    }

    #[test]
    fn applying_twice_is_stable() {
        let items: Vec<u32> = (0..25).collect();
        let page = PageRequest::new(2, 10).unwrap();
        assert_eq!(page.apply(items.clone()), page.apply(items));
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let page = PageRequest::new(i64::MAX, i64::MAX).unwrap();
        assert_eq!(page.offset(), u64::MAX);
        assert!(page.apply(vec![1, 2, 3]).is_empty());
    }
}
