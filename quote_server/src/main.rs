//! Exchange-rate relay server binary.
//!
//! Wires the pieces from the library together:
//!
//! - parses `ServerArgs` (flags or `QUOTE_*` environment variables),
//! - opens the SQLite rate log and creates the `rates` table if needed,
//! - builds the HTTP quote source for the configured pair,
//! - serves the axum router until Ctrl+C.
//!
//! Startup failures are fatal; nothing that happens while serving a request is.
#![warn(missing_docs)]
use std::sync::Arc;

use clap::Parser;
use log::info;
use quote_server::result::Result;
use quote_server::{HttpQuoteSource, RelayService, ServerArgs, SqliteRateStore, router};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let args = ServerArgs::parse();
    let relay_config = args.relay_config()?;
    info!(
        "Budgets: upstream {}ms, record {}ms",
        relay_config.upstream_timeout.as_millis(),
        relay_config.record_timeout.as_millis()
    );

    let store = SqliteRateStore::connect(&args.database_url).await?;
    store.init_schema().await?;
    info!("Database {} ready, rates table present", args.database_url);

    let client = reqwest::Client::builder().build()?;
    let source = HttpQuoteSource::new(client, &args.upstream_url, args.pair);
    info!("Relaying {} from {}", source.pair(), source.url());

    let relay = Arc::new(RelayService::new(
        Arc::new(source),
        Arc::new(store),
        relay_config,
    ));

    let listener = TcpListener::bind(&args.listen_addr).await?;
    info!("Server started on {}", listener.local_addr()?);

    axum::serve(listener, router(relay))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Ctrl+C received. Shutting down server...");
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
