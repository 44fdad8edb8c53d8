//! # Event Types
//!
//! Small value types shared by model and view events.

use std::fmt;

/// Why the list is being fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchReason {
    /// First load when the dashboard starts
    Mount,
    /// The user moved to another page
    PageChanged,
    /// The page index was pulled back inside a shrunken page range
    Clamped,
    /// Explicit reload or retry after a failure
    Retry,
    /// A create, update or delete succeeded
    AfterMutation,
}

impl fmt::Display for FetchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FetchReason::Mount => "mount",
            FetchReason::PageChanged => "page change",
            FetchReason::Clamped => "page clamp",
            FetchReason::Retry => "retry",
            FetchReason::AfterMutation => "refresh after change",
        };
        f.write_str(label)
    }
}

/// Area of the dashboard a view event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Table,
    Pagination,
    Form,
    StatusBar,
}

impl Section {
    /// All sections in drawing order
    pub const ALL: [Section; 4] = [
        Section::Table,
        Section::Pagination,
        Section::Form,
        Section::StatusBar,
    ];
}
