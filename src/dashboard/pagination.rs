//! # Pagination Controller
//!
//! Owns the current page index and the total count it is bounded by. Every
//! change of the page index comes back to the caller as exactly one
//! [`RefetchSignal`]; the controller never fetches anything itself.

use crate::dashboard::models::total_pages_for;

/// Request to load the given page, produced once per page index change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefetchSignal {
    pub page_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationController {
    page_index: usize,
    page_size: usize,
    total_count: usize,
}

impl PaginationController {
    /// Start on page 1 with nothing known about the store yet
    pub fn new(page_size: usize) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(Self {
            page_index: 1,
            page_size,
            total_count: 0,
        })
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn total_pages(&self) -> usize {
        total_pages_for(self.total_count, self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page_index > 1
    }

    /// Record a new total. Clamps the page index down when the range shrank
    /// below it, which requires a re-fetch.
    pub fn set_total_count(&mut self, total_count: usize) -> Option<RefetchSignal> {
        self.total_count = total_count;
        let total_pages = self.total_pages();
        if self.page_index > total_pages {
            tracing::debug!(
                "Clamping page {} to {} (total {})",
                self.page_index,
                total_pages,
                total_count
            );
            self.page_index = total_pages;
            return Some(RefetchSignal {
                page_index: self.page_index,
            });
        }
        None
    }

    /// Move to page `n`, clamped into `[1, total_pages]`
    pub fn go_to(&mut self, n: usize) -> Option<RefetchSignal> {
        let target = n.clamp(1, self.total_pages());
        if target != n {
            tracing::debug!("Requested page {} clamped to {}", n, target);
        }
        if target == self.page_index {
            return None;
        }
        self.page_index = target;
        Some(RefetchSignal { page_index: target })
    }

    pub fn next(&mut self) -> Option<RefetchSignal> {
        if !self.has_next() {
            return None;
        }
        self.go_to(self.page_index + 1)
    }

    pub fn prev(&mut self) -> Option<RefetchSignal> {
        if !self.has_prev() {
            return None;
        }
        self.go_to(self.page_index - 1)
    }
}
