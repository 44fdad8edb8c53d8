//! # Dashboard View Model
//!
//! Coordinates the three independently owned state cells:
//!
//! ```text
//!   PaginationController ──RefetchSignal──▶ SyncEngine ──▶ display
//!   FormSession ─────────commit──────────▶ SyncEngine
//! ```
//!
//! Network calls go through a [`RequestDispatcher`]; their completions are
//! fed back in with [`DashboardViewModel::handle_completion`]. Any successful
//! create, update or delete re-fetches the current page. Nothing patches the
//! displayed page in place.

use crate::dashboard::events::{EventBus, FetchReason, ModelEvent, Section, ViewEvent};
use crate::dashboard::form_session::{FormError, FormSession};
use crate::dashboard::models::{DraftSession, ErrorDetail, Page, RecordId, SyncState};
use crate::dashboard::pagination::{PaginationController, PaginationError, RefetchSignal};
use crate::dashboard::services::{
    RecordService, RequestDispatcher, ServiceCompletion, ServiceRequest,
};
use crate::dashboard::sync_engine::{SyncEngine, SyncOutcome};
use std::collections::HashSet;

/// Type alias for event bus option to reduce complexity
type EventBusOption = Option<Box<dyn EventBus>>;

/// What the list area should show, following the rendering contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListDisplay<'a> {
    /// Nothing requested yet
    Idle,
    Loading,
    Error(&'a ErrorDetail),
    Empty,
    Table(&'a Page),
}

pub struct DashboardViewModel<S: RecordService> {
    pagination: PaginationController,
    engine: SyncEngine,
    form: FormSession,
    dispatcher: RequestDispatcher<S>,
    resource_kind: String,
    pending_deletes: HashSet<RecordId>,
    status_message: Option<String>,
    event_bus: EventBusOption,
    pending_view_events: Vec<ViewEvent>,
}

impl<S: RecordService> DashboardViewModel<S> {
    pub fn new(
        service: S,
        page_size: usize,
        resource_kind: impl Into<String>,
    ) -> Result<Self, PaginationError> {
        Ok(Self {
            pagination: PaginationController::new(page_size)?,
            engine: SyncEngine::new(),
            form: FormSession::new(),
            dispatcher: RequestDispatcher::new(service),
            resource_kind: resource_kind.into(),
            pending_deletes: HashSet::new(),
            status_message: None,
            event_bus: None,
            pending_view_events: Vec::new(),
        })
    }

    pub fn set_event_bus(&mut self, event_bus: Box<dyn EventBus>) {
        self.event_bus = Some(event_bus);
    }

    // ---- read access -------------------------------------------------------

    pub fn service(&self) -> &S {
        self.dispatcher.service()
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    pub fn sync_state(&self) -> &SyncState {
        self.engine.state()
    }

    pub fn last_loaded(&self) -> Option<&Page> {
        self.engine.last_loaded()
    }

    pub fn draft(&self) -> &DraftSession {
        self.form.draft()
    }

    pub fn resource_kind(&self) -> &str {
        &self.resource_kind
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn is_delete_pending(&self, id: RecordId) -> bool {
        self.pending_deletes.contains(&id)
    }

    pub fn has_outstanding_requests(&self) -> bool {
        self.dispatcher.outstanding() > 0
    }

    pub fn list_display(&self) -> ListDisplay<'_> {
        match self.engine.state() {
            SyncState::Idle => ListDisplay::Idle,
            SyncState::Loading => ListDisplay::Loading,
            SyncState::Failed(detail) => ListDisplay::Error(detail),
            SyncState::Loaded(page) if page.is_empty() => ListDisplay::Empty,
            SyncState::Loaded(page) => ListDisplay::Table(page),
        }
    }

    /// Take the view events queued since the last call
    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_view_events)
    }

    // ---- list and navigation ----------------------------------------------

    /// Initial load
    pub fn mount(&mut self) {
        tracing::info!("Mounting dashboard for '{}'", self.resource_kind);
        self.start_fetch(FetchReason::Mount);
        self.emit_view_event([ViewEvent::FullRedrawRequired]);
    }

    /// Reload the current page, e.g. to retry after a failure
    pub fn refresh(&mut self) {
        self.start_fetch(FetchReason::Retry);
    }

    pub fn go_to(&mut self, page_index: usize) -> bool {
        let old_page = self.pagination.page_index();
        let signal = self.pagination.go_to(page_index);
        self.follow_signal(old_page, signal, FetchReason::PageChanged)
    }

    pub fn next_page(&mut self) -> bool {
        let old_page = self.pagination.page_index();
        let signal = self.pagination.next();
        self.follow_signal(old_page, signal, FetchReason::PageChanged)
    }

    pub fn prev_page(&mut self) -> bool {
        let old_page = self.pagination.page_index();
        let signal = self.pagination.prev();
        self.follow_signal(old_page, signal, FetchReason::PageChanged)
    }

    // ---- editor ------------------------------------------------------------

    pub fn open_for_new(&mut self) {
        self.form.open_for_new();
        self.publish_model_event(ModelEvent::DraftOpened {
            mode: self.form.draft().mode,
            record_id: self.form.draft().record.id,
        });
        self.emit_view_event([ViewEvent::section(Section::Form)]);
    }

    /// Open the editor on a copy of a record from the displayed page
    pub fn open_for_edit(&mut self, id: RecordId) -> Result<(), FormError> {
        let record = self
            .engine
            .state()
            .page()
            .and_then(|page| page.find(id))
            .ok_or(FormError::RecordNotDisplayed(id))?;
        self.form.open_for_edit(record)?;
        self.publish_model_event(ModelEvent::DraftOpened {
            mode: self.form.draft().mode,
            record_id: id,
        });
        self.emit_view_event([ViewEvent::section(Section::Form)]);
        Ok(())
    }

    /// Edit a draft field by name. Unknown names change nothing.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        match self.form.set_field(name, value) {
            Some(field) => {
                self.publish_model_event(ModelEvent::DraftFieldChanged { field });
                self.emit_view_event([ViewEvent::section(Section::Form)]);
                true
            }
            None => false,
        }
    }

    /// Validate the draft and send it to the store
    pub fn submit(&mut self) -> Result<(), FormError> {
        let submitted = self.form.submit();
        self.emit_view_event([ViewEvent::section(Section::Form)]);
        let (ticket, record) = submitted?;

        tracing::debug!("Submitting {:?} draft for record {}", ticket.mode, record.id);
        self.dispatcher
            .dispatch(ServiceRequest::Upsert { ticket, record });
        Ok(())
    }

    pub fn cancel(&mut self) {
        let was_active = self.form.is_active();
        self.form.cancel();
        if was_active {
            self.publish_model_event(ModelEvent::DraftClosed { committed: false });
            self.emit_view_event([ViewEvent::section(Section::Form)]);
        }
    }

    // ---- delete ------------------------------------------------------------

    /// Ask the store to delete a record. Ignored while a delete of the same
    /// record is still outstanding.
    pub fn delete(&mut self, id: RecordId) -> bool {
        if !self.pending_deletes.insert(id) {
            tracing::debug!("Delete of record {} already in flight", id);
            return false;
        }
        self.dispatcher.dispatch(ServiceRequest::Remove {
            resource_kind: self.resource_kind.clone(),
            id,
        });
        self.set_status(format!("Deleting record {id}..."));
        true
    }

    // ---- completions -------------------------------------------------------

    /// Wait for the next service completion; `None` when nothing is pending
    pub async fn next_completion(&mut self) -> Option<ServiceCompletion> {
        self.dispatcher.next_completion().await
    }

    /// Handle completions, including the re-fetches they trigger, until no
    /// request is outstanding
    pub async fn run_until_idle(&mut self) {
        while let Some(completion) = self.dispatcher.next_completion().await {
            self.handle_completion(completion);
        }
    }

    pub fn handle_completion(&mut self, completion: ServiceCompletion) {
        match completion {
            ServiceCompletion::Listed { ticket, result } => {
                match self.engine.apply(ticket, result) {
                    SyncOutcome::Loaded {
                        page_index,
                        item_count,
                        total_count,
                    } => {
                        self.publish_model_event(ModelEvent::PageLoaded {
                            page_index,
                            item_count,
                            total_count,
                        });
                        self.emit_view_event([
                            ViewEvent::section(Section::Table),
                            ViewEvent::section(Section::Pagination),
                        ]);

                        let old_page = self.pagination.page_index();
                        let signal = self.pagination.set_total_count(total_count);
                        self.follow_signal(old_page, signal, FetchReason::Clamped);
                    }
                    SyncOutcome::Failed(detail) => {
                        self.publish_model_event(ModelEvent::LoadFailed { detail });
                        self.emit_view_event([ViewEvent::section(Section::Table)]);
                    }
                    SyncOutcome::Discarded => {
                        self.publish_model_event(ModelEvent::StaleResponseDiscarded {
                            page_index: ticket.page_index,
                        });
                    }
                }
            }
            ServiceCompletion::Upserted { ticket, result } => {
                match self.form.complete_submit(ticket, result) {
                    Ok(stored) => {
                        tracing::info!("Saved record {}", stored.id);
                        self.set_status(format!("Saved record {}", stored.id));
                        self.publish_model_event(ModelEvent::RecordSaved {
                            record_id: stored.id,
                            mode: ticket.mode,
                        });
                        if !self.form.is_active() {
                            self.publish_model_event(ModelEvent::DraftClosed { committed: true });
                        }
                        self.emit_view_event([ViewEvent::section(Section::Form)]);
                        self.start_fetch(FetchReason::AfterMutation);
                    }
                    Err(detail) => {
                        tracing::warn!("Saving record failed: {}", detail);
                        self.set_status(format!("Save failed: {detail}"));
                        self.publish_model_event(ModelEvent::MutationFailed { detail });
                        self.emit_view_event([ViewEvent::section(Section::Form)]);
                    }
                }
            }
            ServiceCompletion::Removed { id, result } => {
                self.pending_deletes.remove(&id);
                match result {
                    Ok(()) => {
                        self.set_status(format!("Deleted record {id}"));
                        self.publish_model_event(ModelEvent::RecordRemoved { record_id: id });
                        self.start_fetch(FetchReason::AfterMutation);
                    }
                    Err(error) => {
                        tracing::warn!("Deleting record {} failed: {}", id, error);
                        let detail = ErrorDetail::from(&error);
                        self.set_status(format!("Delete failed: {detail}"));
                        self.publish_model_event(ModelEvent::MutationFailed { detail });
                    }
                }
            }
        }
    }

    // ---- internals ---------------------------------------------------------

    fn follow_signal(
        &mut self,
        old_page: usize,
        signal: Option<RefetchSignal>,
        reason: FetchReason,
    ) -> bool {
        let Some(signal) = signal else {
            return false;
        };
        self.publish_model_event(ModelEvent::PageChanged {
            old_page,
            new_page: signal.page_index,
        });
        self.start_fetch(reason);
        true
    }

    fn start_fetch(&mut self, reason: FetchReason) {
        let page_index = self.pagination.page_index();
        let ticket = self
            .engine
            .begin_fetch(page_index, self.pagination.page_size(), reason);
        self.dispatcher.dispatch(ServiceRequest::List(ticket));
        self.publish_model_event(ModelEvent::FetchStarted { page_index, reason });
        self.emit_view_event([
            ViewEvent::section(Section::Table),
            ViewEvent::section(Section::Pagination),
        ]);
    }

    fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.emit_view_event([ViewEvent::section(Section::StatusBar)]);
    }

    fn publish_model_event(&mut self, event: ModelEvent) {
        tracing::trace!("Model event: {:?}", event);
        if let Some(event_bus) = &mut self.event_bus {
            event_bus.publish_model_event(event);
        }
    }

    fn emit_view_event<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = ViewEvent>,
    {
        for event in events {
            if let Some(event_bus) = &mut self.event_bus {
                event_bus.publish_view_event(event.clone());
            }
            self.pending_view_events.push(event);
        }
    }
}
