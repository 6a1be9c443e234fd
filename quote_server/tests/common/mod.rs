//! Test doubles for the relay's two seams.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quote_common::{Deadline, Quote};
use quote_server::{FetchError, PersistenceError, QuoteSource, RateStore};
use reqwest::StatusCode;
use tokio::net::TcpListener;

/// Always answers with the same bid.
pub struct FixedSource(pub &'static str);

#[async_trait]
impl QuoteSource for FixedSource {
    async fn fetch(&self, _deadline: Deadline) -> Result<Quote, FetchError> {
        Ok(Quote::observed_now(self.0))
    }
}

/// Answers after `delay`, ignoring the deadline it is handed.
pub struct SlowSource {
    pub delay: Duration,
    pub bid: &'static str,
}

#[async_trait]
impl QuoteSource for SlowSource {
    async fn fetch(&self, _deadline: Deadline) -> Result<Quote, FetchError> {
        tokio::time::sleep(self.delay).await;
        Ok(Quote::observed_now(self.bid))
    }
}

/// Always fails as if upstream answered 502.
pub struct FailingSource;

#[async_trait]
impl QuoteSource for FailingSource {
    async fn fetch(&self, _deadline: Deadline) -> Result<Quote, FetchError> {
        Err(FetchError::Status(StatusCode::BAD_GATEWAY))
    }
}

/// Store whose every append fails.
pub struct FailingStore;

#[async_trait]
impl RateStore for FailingStore {
    async fn append(&self, _quote: &Quote, _deadline: Deadline) -> Result<(), PersistenceError> {
        Err(PersistenceError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Store that takes `delay` per append, ignoring its deadline.
pub struct SlowStore(pub Duration);

#[async_trait]
impl RateStore for SlowStore {
    async fn append(&self, _quote: &Quote, _deadline: Deadline) -> Result<(), PersistenceError> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}

/// Serve `relay` on an ephemeral local port and return its base URL.
pub async fn spawn_relay(relay: Arc<quote_server::RelayService>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, quote_server::router(relay)).await.unwrap();
    });
    format!("http://{addr}")
}
