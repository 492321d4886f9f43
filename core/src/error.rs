//! Error types for the shortlink API client.
//!
//! # Design
//! Every failure surfaces through `ApiError`, whatever stage it happens at:
//! configuration, request encoding, transport, status check or body decoding.
//! Non-2xx responses all land in `Http` with the status code and the server's
//! message, so callers that care about "not found" use `is_not_found()` rather
//! than a dedicated variant.

use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `ShortlinkClient` and its building blocks.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The client options were rejected before any request was made.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request did not complete within the configured timeout and was
    /// aborted.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The request never produced a response (DNS, connect, I/O).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A 2xx response body could not be decoded into the expected type.
    #[error("failed to decode response body: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request payload could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status of the response, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout(_))
    }

    pub(crate) fn transport<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ApiError::Transport(Box::new(error))
    }
}
