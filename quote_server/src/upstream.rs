//! Upstream quote fetcher.
//!
//! The provider answers `GET <base>/<PAIR>` with a JSON object keyed by the
//! pair without its separator:
//!
//! ```json
//! {"USDBRL": {"code": "USD", "bid": "5.4321", "ask": "5.4330", "timestamp": "..."}}
//! ```
//!
//! Only `bid` is read. The provider's own timestamp is ignored; the quote is
//! stamped when decoding completes.

use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use quote_common::{CurrencyPair, Deadline, Quote};
use reqwest::Client;
use serde::Deserialize;

use crate::error::FetchError;

/// Provider endpoint used when no other base URL is configured.
pub const DEFAULT_UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/last";

/// Source of fresh quotes for a fixed currency pair.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch one quote, giving up when `deadline` expires.
    async fn fetch(&self, deadline: Deadline) -> Result<Quote, FetchError>;
}

/// The part of a provider entry we care about. Other fields are ignored.
#[derive(Debug, Deserialize)]
struct UpstreamEntry {
    bid: String,
}

/// `QuoteSource` backed by the HTTP quote provider.
#[derive(Debug, Clone)]
pub struct HttpQuoteSource {
    client: Client,
    url: String,
    pair: CurrencyPair,
}

impl HttpQuoteSource {
    /// Build a source for `pair` under the provider base URL `base_url`.
    ///
    /// The client carries no timeout of its own: every call is bounded by the
    /// deadline handed to [`QuoteSource::fetch`].
    pub fn new(client: Client, base_url: &str, pair: CurrencyPair) -> Self {
        let url = format!("{}/{}", base_url.trim_end_matches('/'), pair.code());
        Self { client, url, pair }
    }

    /// Full URL requested on every fetch.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Pair this source quotes.
    pub fn pair(&self) -> CurrencyPair {
        self.pair
    }

    async fn exchange(&self) -> Result<Quote, FetchError> {
        let request = self
            .client
            .get(&self.url)
            .build()
            .map_err(FetchError::Request)?;

        debug!("GET {}", request.url());
        let response = self
            .client
            .execute(request)
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        let bid = decode_bid(&body, &self.pair.response_key())?;
        Ok(Quote::observed_now(bid))
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn fetch(&self, deadline: Deadline) -> Result<Quote, FetchError> {
        deadline.run(self.exchange()).await?
    }
}

/// Pull the `bid` text out of a provider body for the entry under `key`.
fn decode_bid(body: &[u8], key: &str) -> Result<String, FetchError> {
    let mut entries: HashMap<String, serde_json::Value> = serde_json::from_slice(body)?;
    let entry = entries
        .remove(key)
        .ok_or_else(|| FetchError::MissingPair(key.to_string()))?;
    let entry: UpstreamEntry = serde_json::from_value(entry)?;
    Ok(entry.bid)
}
