//! # Request Dispatcher
//!
//! Runs record service calls on spawned tokio tasks and hands their
//! completions back through a channel, so the dashboard consumes network
//! replies as discrete events on its own thread of control.

use super::record_service::RecordService;
use super::ServiceError;
use crate::dashboard::models::{DraftMode, Page, Record, RecordId};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Capacity of the completion channel
const COMPLETION_CHANNEL_SIZE: usize = 32;

/// Identifies one list request. Tickets are issued in increasing `seq` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub page_index: usize,
    pub page_size: usize,
}

/// Identifies one submit of one draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    /// Draft generation the submit was made from
    pub generation: u64,
    pub mode: DraftMode,
}

/// A call to run against the record service
#[derive(Debug, Clone)]
pub enum ServiceRequest {
    List(FetchTicket),
    Upsert {
        ticket: SubmitTicket,
        record: Record,
    },
    Remove {
        resource_kind: String,
        id: RecordId,
    },
}

/// Outcome of a [`ServiceRequest`], tagged with what it answers
#[derive(Debug, Clone)]
pub enum ServiceCompletion {
    Listed {
        ticket: FetchTicket,
        result: Result<Page, ServiceError>,
    },
    Upserted {
        ticket: SubmitTicket,
        result: Result<Record, ServiceError>,
    },
    Removed {
        id: RecordId,
        result: Result<(), ServiceError>,
    },
}

/// Spawns service calls and collects their completions
pub struct RequestDispatcher<S: RecordService> {
    service: Arc<S>,
    completion_sender: mpsc::Sender<ServiceCompletion>,
    completion_receiver: mpsc::Receiver<ServiceCompletion>,
    outstanding: usize,
}

impl<S: RecordService> RequestDispatcher<S> {
    pub fn new(service: S) -> Self {
        let (completion_sender, completion_receiver) = mpsc::channel(COMPLETION_CHANNEL_SIZE);
        Self {
            service: Arc::new(service),
            completion_sender,
            completion_receiver,
            outstanding: 0,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Number of dispatched requests whose completion has not been received
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Spawn the request. Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, request: ServiceRequest) {
        tracing::debug!("Dispatching {:?}", request);
        self.outstanding += 1;

        let service = Arc::clone(&self.service);
        let result_sender = self.completion_sender.clone();

        tokio::spawn(async move {
            let completion = match request {
                ServiceRequest::List(ticket) => ServiceCompletion::Listed {
                    ticket,
                    result: service.list(ticket.page_index, ticket.page_size).await,
                },
                ServiceRequest::Upsert { ticket, record } => ServiceCompletion::Upserted {
                    ticket,
                    result: service.upsert(record).await,
                },
                ServiceRequest::Remove { resource_kind, id } => ServiceCompletion::Removed {
                    id,
                    result: service.remove(&resource_kind, id).await,
                },
            };

            // Receiver may be gone if the dashboard was dropped
            let _ = result_sender.send(completion).await;
        });
    }

    /// Take a completion if one is ready (non-blocking)
    pub fn poll_completion(&mut self) -> Option<ServiceCompletion> {
        let completion = self.completion_receiver.try_recv().ok()?;
        self.outstanding = self.outstanding.saturating_sub(1);
        Some(completion)
    }

    /// Wait for the next completion. Returns `None` when nothing is outstanding.
    pub async fn next_completion(&mut self) -> Option<ServiceCompletion> {
        if self.outstanding == 0 {
            return None;
        }
        let completion = self.completion_receiver.recv().await?;
        self.outstanding = self.outstanding.saturating_sub(1);
        Some(completion)
    }
}
