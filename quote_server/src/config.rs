//! Command-line and environment configuration for the relay server.
//!
//! Every flag can also be set through the environment variable named next to
//! it. Defaults reproduce the reference deployment: port 8080, 200ms for the
//! upstream call, 10ms for the store append.
use std::time::Duration;

use clap::Parser;
use quote_common::{CurrencyPair, net};

use crate::error::ConfigError;
use crate::recorder::DEFAULT_DATABASE_URL;
use crate::upstream::DEFAULT_UPSTREAM_URL;

/// Upstream budget of the reference deployment, in milliseconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 200;
/// Record budget of the reference deployment, in milliseconds.
pub const DEFAULT_RECORD_TIMEOUT_MS: u64 = 10;

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_millis(DEFAULT_UPSTREAM_TIMEOUT_MS);
pub const DEFAULT_RECORD_TIMEOUT: Duration = Duration::from_millis(DEFAULT_RECORD_TIMEOUT_MS);

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Relays exchange-rate quotes and records them", long_about = None)]
pub struct ServerArgs {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "QUOTE_LISTEN_ADDR", default_value_t = net::addr("0.0.0.0", net::SERVER_PORT))]
    pub listen_addr: String,

    /// Base URL of the quote provider; the pair code is appended as a path segment.
    #[arg(long, env = "QUOTE_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// Currency pair to relay, e.g. USD-BRL.
    #[arg(long, env = "QUOTE_PAIR", default_value = "USD-BRL")]
    pub pair: CurrencyPair,

    /// Budget for the upstream call, in milliseconds.
    #[arg(long, env = "QUOTE_UPSTREAM_TIMEOUT_MS", default_value_t = DEFAULT_UPSTREAM_TIMEOUT_MS)]
    pub upstream_timeout_ms: u64,

    /// Budget for the store append, in milliseconds.
    #[arg(long, env = "QUOTE_RECORD_TIMEOUT_MS", default_value_t = DEFAULT_RECORD_TIMEOUT_MS)]
    pub record_timeout_ms: u64,

    /// SQLite database URL.
    #[arg(long, env = "QUOTE_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,
}

impl ServerArgs {
    /// Deadline budgets for the relay handler, validated.
    pub fn relay_config(&self) -> Result<RelayConfig, ConfigError> {
        let config = RelayConfig {
            upstream_timeout: Duration::from_millis(self.upstream_timeout_ms),
            record_timeout: Duration::from_millis(self.record_timeout_ms),
        };
        config.validate()?;
        Ok(config)
    }
}

/// The two independent budgets of a relay request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayConfig {
    /// Budget for fetching the quote upstream.
    pub upstream_timeout: Duration,
    /// Budget for appending the quote to the store.
    pub record_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            record_timeout: DEFAULT_RECORD_TIMEOUT,
        }
    }
}

impl RelayConfig {
    /// Both budgets must be non-zero and recording must be strictly shorter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("upstream"));
        }
        if self.record_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("record"));
        }
        if self.record_timeout >= self.upstream_timeout {
            return Err(ConfigError::RecordNotShorter {
                record_ms: self.record_timeout.as_millis(),
                upstream_ms: self.upstream_timeout.as_millis(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_deployment() {
        let args = ServerArgs::parse_from(["quote_server"]);
        assert_eq!(args.listen_addr, "0.0.0.0:8080");
        assert_eq!(args.pair, CurrencyPair::UsdBrl);
        assert_eq!(args.database_url, "sqlite://exchange_rates.db");
        assert_eq!(args.upstream_timeout_ms, DEFAULT_UPSTREAM_TIMEOUT_MS);
        assert_eq!(args.record_timeout_ms, DEFAULT_RECORD_TIMEOUT_MS);
        assert_eq!(args.relay_config().unwrap(), RelayConfig::default());
        assert_eq!(RelayConfig::default().upstream_timeout, DEFAULT_UPSTREAM_TIMEOUT);
    }

    #[test]
    fn flags_override_defaults() {
        let args = ServerArgs::parse_from([
            "quote_server",
            "--pair",
            "eur-brl",
            "--upstream-timeout-ms",
            "500",
            "--record-timeout-ms",
            "50",
        ]);
        assert_eq!(args.pair, CurrencyPair::EurBrl);
        assert_eq!(
            args.relay_config().unwrap(),
            RelayConfig {
                upstream_timeout: Duration::from_millis(500),
                record_timeout: Duration::from_millis(50),
            }
        );
    }

    #[test]
    fn record_budget_must_be_shorter() {
        let config = RelayConfig {
            upstream_timeout: Duration::from_millis(10),
            record_timeout: Duration::from_millis(10),
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RecordNotShorter {
                record_ms: 10,
                upstream_ms: 10
            })
        );
    }

    #[test]
    fn zero_budgets_are_rejected() {
        let config = RelayConfig {
            upstream_timeout: Duration::from_millis(200),
            record_timeout: Duration::ZERO,
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout("record")));
    }

    #[test]
    fn unknown_pair_is_rejected() {
        assert!(ServerArgs::try_parse_from(["quote_server", "--pair", "XXX-YYY"]).is_err());
    }
}
