//! # List Synchronization Engine
//!
//! State machine over [`SyncState`] for the displayed page.
//!
//! ```text
//!   Idle ──fetch──▶ Loading ──ok──▶ Loaded(page)
//!                     ▲  └──err──▶ Failed(detail)
//!                     └─────fetch─────┘
//! ```
//!
//! Each fetch is issued a [`FetchTicket`] with a larger sequence number than
//! every ticket before it. Only a completion for the latest ticket may change
//! the state; anything older is a stale response and is dropped.

use crate::dashboard::events::FetchReason;
use crate::dashboard::models::{ErrorDetail, Page, SyncState};
use crate::dashboard::services::{FetchTicket, ServiceError};

/// What applying a list completion did to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The page is now displayed; the total should update pagination
    Loaded {
        page_index: usize,
        item_count: usize,
        total_count: usize,
    },
    Failed(ErrorDetail),
    /// The completion answered a superseded request and was ignored
    Discarded,
}

#[derive(Debug, Default)]
pub struct SyncEngine {
    state: SyncState,
    last_loaded: Option<Page>,
    next_seq: u64,
    in_flight: Option<FetchTicket>,
}

impl SyncEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// Most recent successfully loaded page. Survives `Loading` and
    /// `Failed` so a display can keep showing it.
    pub fn last_loaded(&self) -> Option<&Page> {
        self.last_loaded.as_ref()
    }

    /// The request whose completion will be accepted, if any
    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Enter `Loading` for a new request. Supersedes any request in flight.
    pub fn begin_fetch(
        &mut self,
        page_index: usize,
        page_size: usize,
        reason: FetchReason,
    ) -> FetchTicket {
        self.next_seq += 1;
        let ticket = FetchTicket {
            seq: self.next_seq,
            page_index,
            page_size,
        };
        if let Some(previous) = self.in_flight.replace(ticket) {
            tracing::debug!(
                "Fetch #{} (page {}) superseded by #{} (page {})",
                previous.seq,
                previous.page_index,
                ticket.seq,
                ticket.page_index
            );
        }
        tracing::debug!(
            "{} -> loading: fetch #{} for page {} ({})",
            self.state.label(),
            ticket.seq,
            page_index,
            reason
        );
        self.state = SyncState::Loading;
        ticket
    }

    /// Apply a list completion. Stale completions leave the state untouched.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<Page, ServiceError>,
    ) -> SyncOutcome {
        if self.in_flight != Some(ticket) {
            tracing::debug!(
                "Discarding stale response #{} for page {}",
                ticket.seq,
                ticket.page_index
            );
            return SyncOutcome::Discarded;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                let outcome = SyncOutcome::Loaded {
                    page_index: page.page_index,
                    item_count: page.items.len(),
                    total_count: page.total_count,
                };
                tracing::debug!("loading -> loaded: {:?}", outcome);
                self.last_loaded = Some(page.clone());
                self.state = SyncState::Loaded(page);
                outcome
            }
            Err(error) => {
                tracing::warn!("Loading page {} failed: {}", ticket.page_index, error);
                let detail = ErrorDetail::from(&error);
                self.state = SyncState::Failed(detail.clone());
                SyncOutcome::Failed(detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::models::{ErrorKind, Record};

    fn page(page_index: usize, ids: &[u64], total_count: usize) -> Page {
        let items = ids
            .iter()
            .map(|id| Record {
                id: *id,
                title: format!("Record {id}"),
                ..Record::default()
            })
            .collect();
        Page::new(items, page_index, 10, total_count)
    }

    #[test]
    fn engine_should_start_idle() {
        let engine = SyncEngine::new();
        assert_eq!(engine.state(), &SyncState::Idle);
        assert!(!engine.is_fetching());
        assert!(engine.last_loaded().is_none());
    }

    #[test]
    fn begin_fetch_should_enter_loading_with_increasing_tickets() {
        let mut engine = SyncEngine::new();

        let first = engine.begin_fetch(1, 10, FetchReason::Mount);
        let second = engine.begin_fetch(2, 10, FetchReason::PageChanged);

        assert!(engine.state().is_loading());
        assert!(second.seq > first.seq);
        assert_eq!(engine.in_flight(), Some(second));
    }

    #[test]
    fn successful_completion_should_load_page() {
        let mut engine = SyncEngine::new();
        let ticket = engine.begin_fetch(1, 10, FetchReason::Mount);

        let outcome = engine.apply(ticket, Ok(page(1, &[1, 2], 2)));

        assert_eq!(
            outcome,
            SyncOutcome::Loaded {
                page_index: 1,
                item_count: 2,
                total_count: 2
            }
        );
        assert_eq!(engine.state().page().unwrap().items.len(), 2);
        assert!(!engine.is_fetching());
    }

    #[test]
    fn failed_completion_should_carry_error_detail() {
        let mut engine = SyncEngine::new();
        let ticket = engine.begin_fetch(1, 10, FetchReason::Mount);

        let outcome = engine.apply(ticket, Err(ServiceError::decode("missing data")));

        match outcome {
            SyncOutcome::Failed(detail) => assert_eq!(detail.kind, ErrorKind::Decode),
            other => panic!("Expected Failed outcome, got {other:?}"),
        }
        assert_eq!(engine.state().error().unwrap().kind, ErrorKind::Decode);
    }

    #[test]
    fn stale_response_should_never_overwrite_newer_page() {
        let mut engine = SyncEngine::new();
        let page_two = engine.begin_fetch(2, 10, FetchReason::PageChanged);
        let page_three = engine.begin_fetch(3, 10, FetchReason::PageChanged);

        // Newest resolves first, the superseded one arrives late
        engine.apply(page_three, Ok(page(3, &[21], 21)));
        let late = engine.apply(page_two, Ok(page(2, &[11], 21)));

        assert_eq!(late, SyncOutcome::Discarded);
        assert_eq!(engine.state().page().unwrap().page_index, 3);
    }

    #[test]
    fn stale_response_should_not_resolve_current_loading() {
        let mut engine = SyncEngine::new();
        let page_two = engine.begin_fetch(2, 10, FetchReason::PageChanged);
        let page_three = engine.begin_fetch(3, 10, FetchReason::PageChanged);

        assert_eq!(engine.apply(page_two, Ok(page(2, &[11], 30))), SyncOutcome::Discarded);
        assert!(engine.state().is_loading());
        assert_eq!(engine.in_flight(), Some(page_three));
    }

    #[test]
    fn stale_failure_should_be_discarded_too() {
        let mut engine = SyncEngine::new();
        let first = engine.begin_fetch(1, 10, FetchReason::Mount);
        let second = engine.begin_fetch(1, 10, FetchReason::AfterMutation);

        engine.apply(second, Ok(page(1, &[1], 1)));
        let outcome = engine.apply(first, Err(ServiceError::network("timeout")));

        assert_eq!(outcome, SyncOutcome::Discarded);
        assert!(engine.state().page().is_some());
    }

    #[test]
    fn last_loaded_page_should_survive_reload_and_failure() {
        let mut engine = SyncEngine::new();
        let ticket = engine.begin_fetch(1, 10, FetchReason::Mount);
        engine.apply(ticket, Ok(page(1, &[1], 1)));

        let retry = engine.begin_fetch(1, 10, FetchReason::Retry);
        assert!(engine.state().is_loading());
        assert_eq!(engine.last_loaded().unwrap().items[0].id, 1);

        engine.apply(retry, Err(ServiceError::network("offline")));
        assert!(engine.state().error().is_some());
        assert_eq!(engine.last_loaded().unwrap().items[0].id, 1);
    }

    #[test]
    fn failed_state_should_recover_on_next_fetch() {
        let mut engine = SyncEngine::new();
        let ticket = engine.begin_fetch(1, 10, FetchReason::Mount);
        engine.apply(ticket, Err(ServiceError::network("offline")));

        let retry = engine.begin_fetch(1, 10, FetchReason::Retry);
        assert!(engine.state().is_loading());
        engine.apply(retry, Ok(page(1, &[], 0)));
        assert!(engine.state().page().unwrap().is_empty());
    }
}
