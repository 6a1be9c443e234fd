//! Exchange-rate relay server.
//!
//! Serves `GET /cotacao`: pulls a fresh quote from the upstream provider,
//! best-effort appends it to a SQLite rate log, and answers with the bid.
//! The building blocks:
//!
//! - `upstream`: `QuoteSource` trait and the HTTP provider client.
//! - `recorder`: `RateStore` trait and the SQLite append-only log.
//! - `relay`: `RelayService`, the per-request state machine with its two
//!   independent deadline budgets.
//! - `routes`: axum router and error-to-status mapping.
//! - `config`: command-line / environment configuration.
//!
//! A slow or broken store never changes what the caller sees: recording has
//! a budget far shorter than the upstream call and its failures are only
//! logged.
#![warn(missing_docs)]
pub mod config;
pub mod error;
pub mod recorder;
pub mod relay;
pub mod result;
pub mod routes;
pub mod upstream;

pub use config::{RelayConfig, ServerArgs};
pub use error::{ConfigError, FetchError, PersistenceError, RelayError, ServerError};
pub use recorder::{PersistedRecord, RateStore, SqliteRateStore};
pub use relay::{RelayResponse, RelayService, RelayStage};
pub use routes::router;
pub use upstream::{HttpQuoteSource, QuoteSource};
