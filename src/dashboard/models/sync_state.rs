//! # Sync State
//!
//! Tagged state of the locally held page relative to the remote store,
//! plus the user-displayable error detail carried by a failed load.

use super::page::Page;
use crate::dashboard::services::ServiceError;
use std::fmt;

/// Category of a failure, as shown next to its message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    Decode,
    Validation,
    NotFound,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Network => "network error",
            ErrorKind::Decode => "unexpected response",
            ErrorKind::Validation => "validation error",
            ErrorKind::NotFound => "not found",
        };
        f.write_str(label)
    }
}

/// A failure reduced to what the user needs to see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&ServiceError> for ErrorDetail {
    fn from(error: &ServiceError) -> Self {
        Self::new(error.kind(), error.message())
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// State of the displayed list. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    Loading,
    Loaded(Page),
    Failed(ErrorDetail),
}

impl SyncState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SyncState::Loading)
    }

    /// The loaded page, if the state is `Loaded`
    pub fn page(&self) -> Option<&Page> {
        match self {
            SyncState::Loaded(page) => Some(page),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorDetail> {
        match self {
            SyncState::Failed(detail) => Some(detail),
            _ => None,
        }
    }

    /// Short name of the active variant, used in logs and events
    pub fn label(&self) -> &'static str {
        match self {
            SyncState::Idle => "idle",
            SyncState::Loading => "loading",
            SyncState::Loaded(_) => "loaded",
            SyncState::Failed(_) => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_state_should_default_to_idle() {
        let state = SyncState::default();
        assert_eq!(state, SyncState::Idle);
        assert_eq!(state.label(), "idle");
        assert!(state.page().is_none());
    }

    #[test]
    fn error_detail_should_come_from_service_error() {
        let error = ServiceError::NotFound {
            resource_kind: "ambulance".to_string(),
            id: 9,
        };
        let detail = ErrorDetail::from(&error);
        assert_eq!(detail.kind, ErrorKind::NotFound);
        assert!(detail.message.contains("ambulance/9"));
        assert!(detail.to_string().starts_with("not found: "));
    }
}
