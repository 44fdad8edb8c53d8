//! # Services Layer
//!
//! Everything that talks to the record store: the service contract, its
//! HTTP and in-memory implementations, the wire schema, and the dispatcher
//! that runs calls in the background.

pub mod dispatcher;
pub mod error;
pub mod http;
pub mod mock;
pub mod record_service;
pub mod wire;

pub use dispatcher::{
    FetchTicket, RequestDispatcher, ServiceCompletion, ServiceRequest, SubmitTicket,
};
pub use error::ServiceError;
pub use http::{HttpRecordService, REQUEST_TIMEOUT};
pub use mock::{InMemoryRecordService, Operation, ServiceCall};
pub use record_service::RecordService;
pub use wire::{ListResponse, PaginationInfo};
