//! # Page Model
//!
//! One bounded window of records plus the total count needed to derive
//! page boundaries.

use super::record::{Record, RecordId};

/// Page size used by the dashboard unless a profile overrides it
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed to hold `total_count` records, never less than one
pub fn total_pages_for(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_count.div_ceil(page_size).max(1)
}

/// A page of records as returned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<Record>,
    /// 1-based index of this page
    pub page_index: usize,
    pub page_size: usize,
    pub total_count: usize,
}

impl Page {
    pub fn new(items: Vec<Record>, page_index: usize, page_size: usize, total_count: usize) -> Self {
        Self {
            items,
            page_index,
            page_size,
            total_count,
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages_for(self.total_count, self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a record on this page by id
    pub fn find(&self, id: RecordId) -> Option<&Record> {
        self.items.iter().find(|record| record.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_should_round_up() {
        assert_eq!(total_pages_for(25, 10), 3);
        assert_eq!(total_pages_for(24, 10), 3);
        assert_eq!(total_pages_for(20, 10), 2);
        assert_eq!(total_pages_for(21, 10), 3);
    }

    #[test]
    fn total_pages_should_never_be_zero() {
        assert_eq!(total_pages_for(0, 10), 1);
        assert_eq!(total_pages_for(5, 0), 1);
    }

    #[test]
    fn page_should_find_record_by_id() {
        let record = Record {
            id: 4,
            title: "T".to_string(),
            ..Record::default()
        };
        let page = Page::new(vec![record.clone()], 1, 10, 1);
        assert_eq!(page.find(4), Some(&record));
        assert_eq!(page.find(5), None);
        assert!(!page.is_empty());
        assert_eq!(page.total_pages(), 1);
    }
}
