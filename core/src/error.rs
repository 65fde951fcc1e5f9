//! Error types for the translation-service client.
//!
//! # Design
//! Every failure the server reports lands in `Remote`, carrying the HTTP
//! status, a fixed per-operation message, and the parsed JSON error body.
//! Local failures (bad JSON, payload serialization, transport) get their own
//! variants so callers can tell "the server said no" from "we never got a
//! usable answer".

use thiserror::Error;

/// Errors returned by `ApiClient` parse methods and `BilingualClient` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{message} (HTTP {status})")]
    Remote {
        status: u16,
        message: String,
        /// Parsed JSON error body; `Null` when the server sent no body.
        details: serde_json::Value,
    },

    /// A response body could not be parsed into the expected shape.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The push payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// HTTP status for `Remote` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided error body for `Remote` errors.
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            ApiError::Remote { details, .. } => Some(details),
            _ => None,
        }
    }
}
