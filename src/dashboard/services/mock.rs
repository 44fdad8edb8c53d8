//! # In-Memory Record Service
//!
//! A [`RecordService`] that keeps records in memory. Used by tests to drive
//! the dashboard without a store, and to script the awkward cases: slow
//! pages that resolve out of order, and one-shot failures.

use super::record_service::RecordService;
use super::wire::check_page_args;
use super::ServiceError;
use crate::dashboard::models::{Page, Record, RecordId};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// A call received by the in-memory store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    List { page_index: usize, page_size: usize },
    Upsert { id: RecordId },
    Remove { resource_kind: String, id: RecordId },
}

/// Operation selector for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Upsert,
    Remove,
}

#[derive(Debug)]
struct StoreState {
    records: BTreeMap<RecordId, Record>,
    next_id: RecordId,
    calls: Vec<ServiceCall>,
    list_delays: HashMap<usize, Duration>,
    failures: HashMap<Operation, ServiceError>,
}

/// Cloneable handle to a shared in-memory store
#[derive(Debug, Clone)]
pub struct InMemoryRecordService {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryRecordService {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                records: BTreeMap::new(),
                next_id: 1,
                calls: Vec::new(),
                list_delays: HashMap::new(),
                failures: HashMap::new(),
            })),
        }
    }

    /// Create a store holding `count` generated records with ids `1..=count`
    pub fn with_generated_records(count: usize) -> Self {
        let service = Self::new();
        for n in 1..=count as RecordId {
            service.insert(Record {
                id: n,
                title: format!("Record {n}"),
                description: format!("Description {n}"),
                location: format!("Station {n}"),
                image: None,
            });
        }
        service
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // A poisoned lock only means a test panicked mid-call
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert or replace a record directly, bypassing the call log
    pub fn insert(&self, record: Record) {
        let mut state = self.lock();
        state.next_id = state.next_id.max(record.id + 1);
        state.records.insert(record.id, record);
    }

    /// Delete a record directly, bypassing the call log
    pub fn delete_directly(&self, id: RecordId) -> Option<Record> {
        self.lock().records.remove(&id)
    }

    /// Id the store will assign to the next created record
    pub fn set_next_id(&self, id: RecordId) {
        self.lock().next_id = id;
    }

    /// Delay responses for one page, to make requests resolve out of order
    pub fn set_list_delay(&self, page_index: usize, delay: Duration) {
        self.lock().list_delays.insert(page_index, delay);
    }

    /// Make the next call of `operation` fail with `error`
    pub fn fail_next(&self, operation: Operation, error: ServiceError) {
        self.lock().failures.insert(operation, error);
    }

    pub fn record_count(&self) -> usize {
        self.lock().records.len()
    }

    pub fn get(&self, id: RecordId) -> Option<Record> {
        self.lock().records.get(&id).cloned()
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.lock().calls.clone()
    }

    /// Page indexes requested through `list`, in call order
    pub fn list_calls(&self) -> Vec<usize> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                ServiceCall::List { page_index, .. } => Some(*page_index),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn take_failure(&self, operation: Operation) -> Option<ServiceError> {
        self.lock().failures.remove(&operation)
    }
}

impl Default for InMemoryRecordService {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordService for InMemoryRecordService {
    async fn list(&self, page_index: usize, page_size: usize) -> Result<Page, ServiceError> {
        let delay = {
            let mut state = self.lock();
            state.calls.push(ServiceCall::List {
                page_index,
                page_size,
            });
            state.list_delays.get(&page_index).copied()
        };
        check_page_args(page_index, page_size)?;

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.take_failure(Operation::List) {
            return Err(error);
        }

        // Read after the delay so a slow page reflects the store at reply time
        let state = self.lock();
        let items = state
            .records
            .values()
            .skip((page_index - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect();
        Ok(Page::new(items, page_index, page_size, state.records.len()))
    }

    async fn upsert(&self, record: Record) -> Result<Record, ServiceError> {
        self.lock().calls.push(ServiceCall::Upsert { id: record.id });
        if let Some(error) = self.take_failure(Operation::Upsert) {
            return Err(error);
        }

        let missing = record.missing_required_fields();
        if !missing.is_empty() {
            return Err(ServiceError::validation(format!(
                "missing {}",
                missing
                    .iter()
                    .map(|field| field.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        let mut state = self.lock();
        let mut stored = record;
        if stored.is_new() {
            stored.id = state.next_id;
            state.next_id += 1;
        }
        state.records.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn remove(&self, resource_kind: &str, id: RecordId) -> Result<(), ServiceError> {
        self.lock().calls.push(ServiceCall::Remove {
            resource_kind: resource_kind.to_string(),
            id,
        });
        if let Some(error) = self.take_failure(Operation::Remove) {
            return Err(error);
        }

        match self.lock().records.remove(&id) {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound {
                resource_kind: resource_kind.to_string(),
                id,
            }),
        }
    }
}
