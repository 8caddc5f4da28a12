//! Error types for the API shell.
//!
//! # Design
//! Only transport-level and timing problems are errors. A well-formed
//! envelope whose `code` is not `success` resolves normally; callers that
//! want a `Result` out of it use `ResponseEnvelope::into_data`, which is the
//! only producer of `Rejected`.

use thiserror::Error;

use crate::types::ResponseCode;

/// Errors returned by `ApiClient` and its transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The timer won the race against the transport.
    #[error("Request timed out")]
    Timeout,

    /// Network-level failure: DNS, refused connection, redirect policy
    /// violation, unreadable body.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body is not JSON of the expected shape.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The envelope carried a non-success code.
    #[error("server responded with {code}: {message}")]
    Rejected { code: ResponseCode, message: String },
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout)
    }
}
