use serde::{Deserialize, Serialize};

/// One page of a listing, ready for a template context.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub number: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T: Serialize> Page<T> {
    pub fn new(items: Vec<T>, number: u64, per_page: u64, total_items: u64, total_pages: u64) -> Self {
        Page {
            has_prev: number > 1,
            has_next: number < total_pages,
            items,
            number,
            per_page,
            total_items,
            total_pages,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
}

impl PageQuery {
    /// Page numbers are 1-based; zero and absent both mean the first page.
    pub fn number(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prev_next_flags() {
        let first: Page<u32> = Page::new(vec![1, 2, 3, 4, 5], 1, 5, 12, 3);
        assert!(!first.has_prev);
        assert!(first.has_next);

        let last: Page<u32> = Page::new(vec![11, 12], 3, 5, 12, 3);
        assert!(last.has_prev);
        assert!(!last.has_next);
    }

    #[test]
    fn page_query_clamps_to_one() {
        assert_eq!(PageQuery { page: None }.number(), 1);
        assert_eq!(PageQuery { page: Some(0) }.number(), 1);
        assert_eq!(PageQuery { page: Some(3) }.number(), 3);
    }
}
