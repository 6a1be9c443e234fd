//! Quote Client binary.
//!
//! Reads its configuration from the environment, fetches the current bid from
//! the relay, and writes `Dollar: <bid>` to the output file. Exits with 1 when
//! the quote could not be fetched, 2 when it could not be saved, and 3 on a
//! bad configuration value.
//!
//! Usage example:
//! ```bash
//! QUOTE_SERVER_URL=http://server:8080/cotacao quote_client
//! ```
#![warn(missing_docs)]
use std::process::ExitCode;

use log::{error, info};
use quote_client::{ClientConfig, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logger();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Error reading configuration: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    match run(&config).await {
        Ok(bid) => {
            info!(
                "Exchange rate saved to {}: Dollar: {}",
                config.output_path.display(),
                bid
            );
            ExitCode::SUCCESS
        }
        Err(e) if e.is_fetch_failure() => {
            error!("Error fetching exchange rate: {}", e);
            ExitCode::from(e.exit_code())
        }
        Err(e) => {
            error!("Error saving exchange rate to file: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
