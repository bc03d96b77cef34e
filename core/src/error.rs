//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` and `BadRequest` get dedicated variants because callers tell
//! "no such todo" and "the server rejected the input" apart from generic
//! failures. Other non-2xx responses land in `HttpError` with the raw status
//! and body. `Network` covers everything that prevented a response at all.

/// Errors returned by `TodoClient` parse methods and by transports.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404: the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400, e.g. a malformed id or blank text.
    #[error("bad request: {message}")]
    BadRequest { message: String },

    /// The id cannot name a single todo (empty, or a reserved path segment).
    /// Raised before any request is sent.
    #[error("invalid todo id: {0:?}")]
    InvalidId(String),

    /// The configured base URL cannot carry path segments.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    /// The server returned a non-2xx status other than 400 or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response (connection refused, reset, ...).
    #[error("network error: {0}")]
    Network(String),
}
