//! # Service Errors
//!
//! Failures reported by a record service. Every variant is recoverable by
//! further user action; none of them is fatal to the process.

use crate::dashboard::models::{ErrorKind, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Transport failure, timeout, or a non-2xx status from the store
    #[error("network error: {message}")]
    Network { message: String },

    /// The response body did not match the expected schema
    #[error("could not decode store response: {message}")]
    Decode { message: String },

    /// The payload was refused, locally or by the store
    #[error("invalid request: {message}")]
    Validation { message: String },

    /// The delete target does not exist
    #[error("record {resource_kind}/{id} was not found")]
    NotFound { resource_kind: String, id: RecordId },
}

impl ServiceError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Non-success status that has no more specific meaning
    pub fn unexpected_status(status: reqwest::StatusCode) -> Self {
        Self::network(format!(
            "store returned HTTP {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        ))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Network { .. } => ErrorKind::Network,
            ServiceError::Decode { .. } => ErrorKind::Decode,
            ServiceError::Validation { .. } => ErrorKind::Validation,
            ServiceError::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// The message without the category prefix
    pub fn message(&self) -> String {
        match self {
            ServiceError::Network { message }
            | ServiceError::Decode { message }
            | ServiceError::Validation { message } => message.clone(),
            ServiceError::NotFound { .. } => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(error: reqwest::Error) -> Self {
        // Keep the full cause chain, reqwest's top-level message is terse
        let mut message = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            message.push_str(&format!("\n  Caused by: {cause}"));
            source = cause.source();
        }
        if error.is_decode() {
            Self::Decode { message }
        } else {
            Self::Network { message }
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(error: serde_json::Error) -> Self {
        Self::decode(error.to_string())
    }
}
