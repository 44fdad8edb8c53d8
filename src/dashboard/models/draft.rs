//! # Draft Model
//!
//! The in-progress, uncommitted copy of a record held by the editor form.

use super::record::Record;
use super::sync_state::ErrorDetail;

/// Whether the draft creates a new record or replaces an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    New,
    Edit,
}

/// Editor state. The record is always an owned copy, never a view into
/// the displayed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSession {
    pub active: bool,
    pub mode: DraftMode,
    pub record: Record,
    /// Error from the last submit attempt, kept until the next attempt
    pub error: Option<ErrorDetail>,
    /// Set while an upsert for this draft is outstanding
    pub submitting: bool,
}

impl DraftSession {
    /// Closed session holding an empty new-mode record
    pub fn closed() -> Self {
        Self {
            active: false,
            mode: DraftMode::New,
            record: Record::empty(),
            error: None,
            submitting: false,
        }
    }

    pub fn for_new() -> Self {
        Self {
            active: true,
            ..Self::closed()
        }
    }

    pub fn for_edit(record: Record) -> Self {
        Self {
            active: true,
            mode: DraftMode::Edit,
            record,
            error: None,
            submitting: false,
        }
    }
}

impl Default for DraftSession {
    fn default() -> Self {
        Self::closed()
    }
}
