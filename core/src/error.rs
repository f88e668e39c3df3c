//! Error types for the TaskMate API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the provider reports "the task
//! does not exist" differently from "the server returned an unexpected
//! status." All other unexpected statuses land in `Api` with the raw status
//! code and body.

use thiserror::Error;

/// Errors returned by `TaskApi` parse methods and `TaskClient` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 for a task id.
    #[error("task with ID {id} not found")]
    NotFound { id: i64 },

    /// The server returned a status other than the one the operation expects.
    #[error("API error: {body} (status: {status})")]
    Api { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("failed to marshal request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The request never produced a response (connection refused, timeout, ...).
    #[error("request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
    /// Wrap any transport-level failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(err))
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
