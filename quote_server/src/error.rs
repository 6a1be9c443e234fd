//! Error types used across the relay server crate.
//!
//! Failures are split by the path they happen on:
//! - `FetchError`: the upstream call on the critical path. Its sub-causes are
//!   logged but collapse into `RelayError::UpstreamFetchFailed` for the caller.
//! - `PersistenceError`: the best-effort store append. It never leaves the
//!   relay handler, so it has no place in `RelayError`.
//! - `RelayError`: what a single `/cotacao` request can fail with.
//! - `ConfigError` / `ServerError`: startup and serving failures of the binary.
use std::io;

use quote_common::DeadlineExceeded;
use reqwest::StatusCode;
use thiserror::Error;

/// Why an upstream fetch failed. Only ever shown in logs.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be built (bad URL and the like).
    #[error("failed to build upstream request: {0}")]
    Request(#[source] reqwest::Error),

    /// Connection, TLS, or body transfer failure.
    #[error("upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned status {0}")]
    Status(StatusCode),

    /// Body was not the JSON shape we expect.
    #[error("malformed upstream body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Body decoded but did not contain the requested pair.
    #[error("upstream body has no entry for {0}")]
    MissingPair(String),

    /// The upstream budget ran out; the in-flight call was cancelled.
    #[error("upstream fetch cancelled: {0}")]
    DeadlineExceeded(#[from] DeadlineExceeded),
}

impl FetchError {
    /// Classify a `reqwest` error raised while building or sending a request.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_builder() {
            FetchError::Request(err)
        } else {
            FetchError::Transport(err)
        }
    }
}

/// Why a rate could not be appended to the store. Logged and swallowed.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The database rejected or failed the statement.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The record budget ran out before the insert committed.
    #[error("record abandoned: {0}")]
    DeadlineExceeded(#[from] DeadlineExceeded),
}

/// Failure of one relay request, as seen by the HTTP layer.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Upstream could not produce a quote within its budget.
    #[error("upstream fetch failed: {0}")]
    UpstreamFetchFailed(#[from] FetchError),

    /// The quote could not be encoded as a response body.
    #[error("response encode failed: {0}")]
    ResponseEncodeFailed(#[source] serde_json::Error),
}

/// Rejected relay configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A budget of zero would fail every request.
    #[error("{0} timeout must be greater than zero")]
    ZeroTimeout(&'static str),

    /// Recording must always give up before the upstream call would.
    #[error("record timeout ({record_ms}ms) must be shorter than upstream timeout ({upstream_ms}ms)")]
    RecordNotShorter {
        /// Configured record budget.
        record_ms: u128,
        /// Configured upstream budget.
        upstream_ms: u128,
    },
}

/// Fatal errors of the server process.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Store could not be opened or its schema created.
    #[error("store initialisation failed: {0}")]
    Store(#[from] sqlx::Error),

    /// HTTP client for the upstream could not be created.
    #[error("upstream client initialisation failed: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Listener bind or serve failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
