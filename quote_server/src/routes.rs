//! HTTP surface of the relay.
//!
//! - `GET /cotacao`: latest quote as `{"bid": "<text>"}`, or 500 with a
//!   plain-text message when upstream fails.
//! - `GET /healthz`: liveness check; touches neither upstream nor store.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use quote_common::net::QUOTE_PATH;

use crate::error::RelayError;
use crate::relay::RelayService;

/// Build the router serving `relay`.
pub fn router(relay: Arc<RelayService>) -> Router {
    Router::new()
        .route(QUOTE_PATH, get(quote_handler))
        .route("/healthz", get(liveness_handler))
        .with_state(relay)
}

async fn quote_handler(State(relay): State<Arc<RelayService>>) -> Result<Response, RelayError> {
    let response = relay.relay().await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], response.body).into_response())
}

async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let message = match self {
            RelayError::UpstreamFetchFailed(_) => "Failed to fetch exchange rate",
            RelayError::ResponseEncodeFailed(_) => "Failed to encode exchange rate",
        };
        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}
