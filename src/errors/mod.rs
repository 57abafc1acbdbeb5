//! Error types for the mull application.
//!
//! Fallible paths return [`AppResult`], which wraps [`AppError`]. Domain
//! failures keep their own enums ([`ProviderError`], [`DatabaseError`]) and
//! are lifted into `AppError` with `#[from]`, so call sites propagate with
//! `?` all the way up to `main`.

use thiserror::Error;

/// Failures while talking to the AI provider.
///
/// Every variant aborts the operation that triggered the call. The client
/// never retries and never substitutes cached or fabricated output.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request produced no HTTP response at all: connection refused,
    /// DNS failure, or the request timeout elapsed.
    #[error("AI provider unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The provider answered with a non-success status (bad API key,
    /// rate limit, server fault).
    #[error("AI provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body was not a chat completion we can read.
    #[error("Malformed reply from AI provider: {0}")]
    MalformedReply(String),
}

/// Failures in the SQLite storage layer.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A query could not be prepared, executed, or its rows converted.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The connection pool could not hand out a connection.
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// A row the caller addressed does not exist (or belongs to someone
    /// else, which callers must not be able to tell apart).
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading or validation failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem trouble outside the database itself.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding of command output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The user has nothing to analyze yet: an empty journal, or an empty
    /// question. Presentation layers should treat this as information,
    /// not failure.
    #[error("No journal data to analyze")]
    NoData,

    /// An operation referenced a user id that does not exist.
    #[error("Unknown user id {0}")]
    UnknownUser(i64),

    /// Provider-side failure, see [`ProviderError`].
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// Storage-side failure, see [`DatabaseError`].
    #[error("{0}")]
    Database(#[from] DatabaseError),
}

/// Convenience alias used by every fallible function in the crate.
pub type AppResult<T> = Result<T, AppError>;
