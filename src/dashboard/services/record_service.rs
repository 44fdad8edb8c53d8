//! # Record Service Contract
//!
//! The seam between the dashboard and the remote paginated store.

use crate::dashboard::models::{Page, Record, RecordId};
use crate::dashboard::services::ServiceError;
use std::future::Future;

/// Contract over a remote paginated CRUD store.
///
/// `list` and `remove` are safe to retry. `upsert` of a record with id 0 is
/// not: every call creates a new record, so callers must not re-submit a
/// create while one is in flight.
pub trait RecordService: Send + Sync + 'static {
    /// Fetch one page. `page_index` is 1-based; both arguments must be >= 1.
    fn list(
        &self,
        page_index: usize,
        page_size: usize,
    ) -> impl Future<Output = Result<Page, ServiceError>> + Send;

    /// Create (`id == 0`) or replace a record. The returned record is
    /// authoritative.
    fn upsert(&self, record: Record) -> impl Future<Output = Result<Record, ServiceError>> + Send;

    /// Delete an existing record. An absent record is reported as
    /// [`ServiceError::NotFound`].
    fn remove(
        &self,
        resource_kind: &str,
        id: RecordId,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;
}
