//! Fetching the current bid from the relay.
//!
//! One GET, bounded end to end (connect, headers, and body) by the deadline
//! passed in. Anything other than a 2xx carrying `{"bid": "<text>"}` fails.
use log::{debug, info};
use quote_common::{BidResponse, Deadline};
use reqwest::Client;

use crate::error::ClientError;
use crate::result::Result;

/// Helper type for requesting quotes from the relay.
#[derive(Debug, Clone)]
pub struct RateFetcher {
    client: Client,
    url: String,
}

impl RateFetcher {
    /// Fetcher for the relay quote route at `url`.
    pub fn new(client: Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }

    /// Fetch the bid text, giving up when `deadline` expires.
    pub async fn fetch_bid(&self, deadline: Deadline) -> Result<String> {
        deadline.run(self.exchange()).await?
    }

    async fn exchange(&self) -> Result<String> {
        let request = self
            .client
            .get(&self.url)
            .build()
            .map_err(ClientError::RequestFailed)?;

        info!("Requesting exchange rate from {}", request.url());
        let response = self
            .client
            .execute(request)
            .await
            .map_err(ClientError::RequestFailed)?;

        let status = response.status();
        debug!("Response status: {}", status);
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body = response.bytes().await.map_err(ClientError::RequestFailed)?;
        let BidResponse { bid } = serde_json::from_slice(&body)?;
        Ok(bid)
    }
}
