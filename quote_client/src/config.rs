//! Client configuration.
//!
//! The client takes no command-line flags. Three environment variables can
//! override the reference setup:
//!
//! | variable                  | default                          |
//! |---------------------------|----------------------------------|
//! | `QUOTE_SERVER_URL`        | `http://localhost:8080/cotacao`  |
//! | `QUOTE_CLIENT_TIMEOUT_MS` | `300`                            |
//! | `QUOTE_OUTPUT_PATH`       | `cotacao.txt`                    |
use std::path::PathBuf;
use std::time::Duration;

use quote_common::net::DEFAULT_SERVER_URL;

use crate::error::ClientError;
use crate::result::Result;

/// Overall budget of the reference setup. Larger than the relay's 200ms
/// upstream budget so a full server-side round trip fits inside it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(300);
/// Output artifact of the reference setup.
pub const DEFAULT_OUTPUT_PATH: &str = "cotacao.txt";

/// Where to ask, how long to wait, and where to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Full URL of the relay's quote route.
    pub server_url: String,
    /// Overall budget for the request, body included.
    pub timeout: Duration,
    /// File receiving the `Dollar: <bid>` line.
    pub output_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl ClientConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, falling back to defaults for
    /// unset or blank keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        if let Some(url) = get("QUOTE_SERVER_URL") {
            config.server_url = url;
        }
        if let Some(raw) = get("QUOTE_CLIENT_TIMEOUT_MS") {
            let millis: u64 = raw.parse().map_err(|e| {
                ClientError::Config(format!("QUOTE_CLIENT_TIMEOUT_MS={raw}: {e}"))
            })?;
            if millis == 0 {
                return Err(ClientError::Config(
                    "QUOTE_CLIENT_TIMEOUT_MS must be greater than zero".to_string(),
                ));
            }
            config.timeout = Duration::from_millis(millis);
        }
        if let Some(path) = get("QUOTE_OUTPUT_PATH") {
            config.output_path = PathBuf::from(path);
        }
        Ok(config)
    }
}
