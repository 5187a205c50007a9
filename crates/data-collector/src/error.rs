// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for a single collection.
//!
//! Each pipeline stage owns its error type. [`CollectError`] unifies them
//! so the service can render any failure into the result envelope.

/// Every violation found while validating a configuration, in check order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid configuration: {}", .0.join("; "))]
pub struct ValidationErrors(pub Vec<String>);

/// A valid configuration that still could not be turned into a request.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported method '{0}'")]
    UnsupportedMethod(String),

    #[error("invalid header '{0}'")]
    InvalidHeader(String),

    #[error("failed to serialize request body: {0}")]
    Body(#[from] serde_json::Error),
}

/// A network-level failure during one attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// What the final failed attempt left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastFailure {
    Transport(TransportError),
    Status { status: u16, status_text: String },
}

impl std::fmt::Display for LastFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LastFailure::Transport(err) => write!(f, "{err}"),
            LastFailure::Status {
                status,
                status_text,
            } => write!(f, "status {status}: {status_text}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("no attempts made: retryTimes is 0")]
    NoAttempts,

    #[error("request failed after {attempts} attempt(s): {last}")]
    Exhausted { attempts: u32, last: LastFailure },

    #[error("collection cancelled")]
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to decode response body as json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("path not found: '{0}'")]
pub struct PathNotFound(pub String);

/// Any failure that makes a collection report `success = false`.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
