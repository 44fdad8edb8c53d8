//! # Models Module
//!
//! Plain data held by the dashboard: records, pages, the sync state of the
//! displayed list, and the editor draft.

pub mod draft;
pub mod page;
pub mod record;
pub mod sync_state;

pub use draft::{DraftMode, DraftSession};
pub use page::{total_pages_for, Page, DEFAULT_PAGE_SIZE};
pub use record::{Record, RecordField, RecordId, UnknownField, NEW_RECORD_ID};
pub use sync_state::{ErrorDetail, ErrorKind, SyncState};
