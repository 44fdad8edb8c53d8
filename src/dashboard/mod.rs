//! # Dashboard
//!
//! The record dashboard split into MVVM layers:
//!
//! - `models`: records, pages, sync state and drafts
//! - `services`: the record store client and its request dispatcher
//! - `pagination`, `sync_engine`, `form_session`: the three state machines
//! - `view_model`: coordinates them and emits view events
//! - `views`: plain text rendering
//! - `controller`: the console event loop

pub mod commands;
pub mod controller;
pub mod events;
pub mod form_session;
pub mod models;
pub mod pagination;
pub mod services;
pub mod sync_engine;
pub mod view_model;
pub mod views;

pub use commands::{CommandParseError, DashboardCommand, HELP_TEXT};
pub use controller::AppController;
pub use events::{EventBus, FetchReason, ModelEvent, Section, SimpleEventBus, ViewEvent};
pub use form_session::{FormError, FormSession};
pub use models::{
    DraftMode, DraftSession, ErrorDetail, ErrorKind, Page, Record, RecordField, RecordId,
    SyncState,
};
pub use pagination::{PaginationController, PaginationError, RefetchSignal};
pub use services::{HttpRecordService, InMemoryRecordService, RecordService, ServiceError};
pub use sync_engine::{SyncEngine, SyncOutcome};
pub use view_model::{DashboardViewModel, ListDisplay};
pub use views::TextRenderer;
