//! # Model Events
//!
//! Emitted when dashboard state changes, so observers can follow the
//! synchronization loop without holding references into it.

use super::types::FetchReason;
use crate::dashboard::models::{DraftMode, ErrorDetail, RecordField, RecordId};

#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// Current page index changed (navigation or clamp)
    PageChanged { old_page: usize, new_page: usize },

    /// A list request was issued
    FetchStarted { page_index: usize, reason: FetchReason },

    /// The latest list request resolved
    PageLoaded {
        page_index: usize,
        item_count: usize,
        total_count: usize,
    },

    /// The latest list request failed
    LoadFailed { detail: ErrorDetail },

    /// A reply for a superseded list request was ignored
    StaleResponseDiscarded { page_index: usize },

    /// The editor opened a draft
    DraftOpened { mode: DraftMode, record_id: RecordId },

    /// A draft field was edited
    DraftFieldChanged { field: RecordField },

    /// The editor closed, either after a save or by cancel
    DraftClosed { committed: bool },

    /// The store accepted a create or update
    RecordSaved { record_id: RecordId, mode: DraftMode },

    /// The store deleted a record
    RecordRemoved { record_id: RecordId },

    /// A create, update or delete failed
    MutationFailed { detail: ErrorDetail },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::models::ErrorKind;

    #[test]
    fn page_changed_event_should_carry_both_pages() {
        let event = ModelEvent::PageChanged {
            old_page: 3,
            new_page: 2,
        };

        match event {
            ModelEvent::PageChanged { old_page, new_page } => {
                assert_eq!(old_page, 3);
                assert_eq!(new_page, 2);
            }
            _ => panic!("Expected PageChanged event"),
        }
    }

    #[test]
    fn load_failed_event_should_carry_detail() {
        let detail = ErrorDetail::new(ErrorKind::Network, "connection refused");
        let event = ModelEvent::LoadFailed {
            detail: detail.clone(),
        };

        match event {
            ModelEvent::LoadFailed { detail: d } => assert_eq!(d, detail),
            _ => panic!("Expected LoadFailed event"),
        }
    }
}
