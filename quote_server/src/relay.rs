//! Relay request handler.
//!
//! One call to [`RelayService::relay`] walks a single request through
//!
//! ```text
//! Received -> FetchingUpstream -> FetchFailed                      (error)
//!                              -> Fetched -> Recording -> Responding (bid)
//! ```
//!
//! The upstream call and the store append each get a fresh deadline minted
//! from their own budget. The record outcome is logged and then dropped: it is
//! awaited inline, so ordering stays fetch, record, respond, but it can never
//! turn a fetched quote into an error response.

use std::sync::Arc;

use log::{debug, error, info, warn};
use quote_common::{BidResponse, Deadline, Quote};
use strum_macros::Display;

use crate::config::RelayConfig;
use crate::error::{FetchError, PersistenceError, RelayError};
use crate::recorder::RateStore;
use crate::upstream::QuoteSource;

/// Stages of a relay request, as reported in debug logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RelayStage {
    /// Request accepted by the HTTP layer.
    Received,
    /// Waiting on the upstream provider.
    FetchingUpstream,
    /// Upstream failed or ran out of time. Terminal.
    FetchFailed,
    /// Quote decoded.
    Fetched,
    /// Appending the quote to the store.
    Recording,
    /// Encoding the response body. Terminal.
    Responding,
}

/// Successful outcome of one relay request.
#[derive(Debug, Clone)]
pub struct RelayResponse {
    /// The quote that was relayed.
    pub quote: Quote,
    /// Encoded `{"bid": ...}` body.
    pub body: Vec<u8>,
    /// Whether the store append succeeded. Informational only.
    pub persisted: bool,
}

/// Fetches, records, and encodes quotes for incoming requests.
///
/// Owns its quote source and store; nothing is shared between requests
/// beyond these handles.
pub struct RelayService {
    source: Arc<dyn QuoteSource>,
    store: Arc<dyn RateStore>,
    config: RelayConfig,
}

impl RelayService {
    /// Create a relay over the given source and store.
    pub fn new(source: Arc<dyn QuoteSource>, store: Arc<dyn RateStore>, config: RelayConfig) -> Self {
        Self {
            source,
            store,
            config,
        }
    }

    /// Handle one request end to end.
    ///
    /// Only a failed upstream fetch or a failed body encode produces an error;
    /// the store outcome is reported in [`RelayResponse::persisted`].
    pub async fn relay(&self) -> Result<RelayResponse, RelayError> {
        enter(RelayStage::Received);

        enter(RelayStage::FetchingUpstream);
        let deadline = Deadline::after(self.config.upstream_timeout);
        let quote = match self.fetch(deadline).await {
            Ok(quote) => quote,
            Err(e) => {
                error!(
                    "Failed to fetch exchange rate within {}ms: {}",
                    deadline.budget().as_millis(),
                    e
                );
                enter(RelayStage::FetchFailed);
                return Err(RelayError::UpstreamFetchFailed(e));
            }
        };
        enter(RelayStage::Fetched);

        enter(RelayStage::Recording);
        let deadline = Deadline::after(self.config.record_timeout);
        let persisted = match self.record(&quote, deadline).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Failed to record exchange rate {} within {}ms: {}",
                    quote.bid(),
                    deadline.budget().as_millis(),
                    e
                );
                false
            }
        };

        enter(RelayStage::Responding);
        let body = BidResponse::from(&quote)
            .to_json_bytes()
            .map_err(RelayError::ResponseEncodeFailed)?;
        info!("Relaying bid {} (recorded: {})", quote.bid(), persisted);

        Ok(RelayResponse {
            quote,
            body,
            persisted,
        })
    }

    async fn fetch(&self, deadline: Deadline) -> Result<Quote, FetchError> {
        deadline.run(self.source.fetch(deadline)).await?
    }

    async fn record(&self, quote: &Quote, deadline: Deadline) -> Result<(), PersistenceError> {
        deadline.run(self.store.append(quote, deadline)).await?
    }
}

fn enter(stage: RelayStage) {
    debug!("relay stage: {}", stage);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_render_by_name() {
        assert_eq!(RelayStage::FetchingUpstream.to_string(), "FetchingUpstream");
        assert_eq!(RelayStage::Responding.to_string(), "Responding");
    }
}
