//! Quote Client: asks the relay for the current exchange rate once and writes
//! it to a file as `Dollar: <bid>`.
//!
//! The whole exchange with the relay runs under a single overall deadline
//! (300ms by default). Any failure is fatal and leaves the output file as it
//! was. See `config` for the environment variables the client reads.
#![warn(missing_docs)]
pub mod config;
pub mod error;
pub mod fetcher;
pub mod output;
pub mod result;

use log::debug;
use quote_common::Deadline;
use reqwest::Client;

pub use config::ClientConfig;
pub use error::ClientError;
pub use fetcher::RateFetcher;
pub use output::write_rate_line;

use crate::result::Result;

/// Fetch the bid under `config.timeout` and write it to `config.output_path`.
///
/// Returns the bid that was written.
pub async fn run(config: &ClientConfig) -> Result<String> {
    let deadline = Deadline::after(config.timeout);
    let client = Client::builder()
        .build()
        .map_err(ClientError::RequestFailed)?;
    let fetcher = RateFetcher::new(client, &config.server_url);

    let bid = fetcher.fetch_bid(deadline).await?;
    debug!("Received bid {} with {:?} to spare", bid, deadline.remaining());

    write_rate_line(&config.output_path, &bid)?;
    Ok(bid)
}
