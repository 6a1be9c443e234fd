//! Error types used across the Quote Client.
//!
//! Every variant is fatal: the client makes one attempt, and on failure it
//! logs the cause and exits without touching the output file. Fetch-side and
//! output-side failures map to different exit codes.
use std::io;

use quote_common::DeadlineExceeded;
use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for the client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// An environment variable held an unusable value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The request could not be built or sent, or the body not received.
    #[error("request to relay failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    /// The overall budget ran out before a quote arrived.
    #[error("relay did not answer in time: {0}")]
    Timeout(#[from] DeadlineExceeded),

    /// The relay answered with a non-2xx status.
    #[error("relay returned status {0}")]
    Status(StatusCode),

    /// The body was not `{"bid": "<text>"}`.
    #[error("could not decode relay response: {0}")]
    DecodeFailed(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("could not write output file: {0}")]
    OutputFailed(#[from] io::Error),
}

impl ClientError {
    /// Whether the failure happened before a quote was obtained.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            ClientError::RequestFailed(_)
                | ClientError::Timeout(_)
                | ClientError::Status(_)
                | ClientError::DecodeFailed(_)
        )
    }

    /// Process exit code: 1 fetch, 2 output, 3 configuration.
    pub fn exit_code(&self) -> u8 {
        match self {
            ClientError::Config(_) => 3,
            ClientError::OutputFailed(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn fetch_and_output_failures_are_told_apart() {
        let timeout = ClientError::Timeout(DeadlineExceeded {
            budget: Duration::from_millis(300),
        });
        let output = ClientError::OutputFailed(io::Error::from(io::ErrorKind::PermissionDenied));

        assert!(timeout.is_fetch_failure());
        assert!(!output.is_fetch_failure());
        assert_eq!(timeout.exit_code(), 1);
        assert_eq!(output.exit_code(), 2);
        assert_eq!(ClientError::Config("x".into()).exit_code(), 3);
    }

    #[test]
    fn timeout_message_names_the_budget() {
        let err = ClientError::Timeout(DeadlineExceeded {
            budget: Duration::from_millis(300),
        });
        assert_eq!(
            err.to_string(),
            "relay did not answer in time: deadline of 300ms exceeded"
        );
    }
}
