//! Quote data model and the JSON body exchanged between relay and client.
//!
//! A `Quote` is a single bid observation. The bid is kept exactly as the
//! provider sent it: it is text, never a float, so `"5.4321"` comes out the
//! other end as `"5.4321"` and not `5.4320999...`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bid price observation with the moment the relay received it.
///
/// Fields are private: a quote is built once and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    bid: String,
    observed_at: DateTime<Utc>,
}

impl Quote {
    /// Builds a quote with an explicit observation time.
    pub fn new(bid: impl Into<String>, observed_at: DateTime<Utc>) -> Self {
        Self {
            bid: bid.into(),
            observed_at,
        }
    }

    /// Builds a quote stamped with the current time.
    pub fn observed_now(bid: impl Into<String>) -> Self {
        Self::new(bid, Utc::now())
    }

    /// Bid price as received from the provider.
    pub fn bid(&self) -> &str {
        &self.bid
    }

    /// When the relay finished decoding the provider response.
    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

/// Flat response body `{"bid": "<text>"}` served by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidResponse {
    /// Bid price as text.
    pub bid: String,
}

impl BidResponse {
    /// Encode the body to JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl From<&Quote> for BidResponse {
    fn from(quote: &Quote) -> Self {
        Self {
            bid: quote.bid.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_the_bid_verbatim() {
        let quote = Quote::observed_now("5.43210");
        let body = BidResponse::from(&quote).to_json_bytes().unwrap();
        assert_eq!(body, br#"{"bid":"5.43210"}"#);
    }

    #[test]
    fn body_ignores_unknown_fields_when_decoding() {
        let body: BidResponse = serde_json::from_str(r#"{"bid":"1.0","ask":"2.0"}"#).unwrap();
        assert_eq!(body.bid, "1.0");
    }

    #[test]
    fn observed_now_is_monotone_with_wall_clock() {
        let before = Utc::now();
        let quote = Quote::observed_now("1");
        assert!(quote.observed_at() >= before);
        assert!(quote.observed_at() <= Utc::now());
    }
}
