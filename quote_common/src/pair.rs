//! Currency pairs understood by the upstream quote provider.

use strum_macros::{Display, EnumString};

/// Supported currency pairs.
///
/// The string form (`USD-BRL`) is the one the provider expects in the request
/// path. Parsing is case-insensitive so `usd-brl` from an environment variable
/// works too.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[strum(ascii_case_insensitive)]
pub enum CurrencyPair {
    /// US dollar to Brazilian real.
    #[default]
    #[strum(serialize = "USD-BRL")]
    UsdBrl,
    /// Euro to Brazilian real.
    #[strum(serialize = "EUR-BRL")]
    EurBrl,
    /// Pound sterling to Brazilian real.
    #[strum(serialize = "GBP-BRL")]
    GbpBrl,
    /// Bitcoin to Brazilian real.
    #[strum(serialize = "BTC-BRL")]
    BtcBrl,
}

impl CurrencyPair {
    /// Path segment used when requesting this pair, e.g. `USD-BRL`.
    pub fn code(&self) -> String {
        self.to_string()
    }

    /// Key the provider nests the quote object under, e.g. `USDBRL`.
    pub fn response_key(&self) -> String {
        self.code().replace('-', "")
    }
}
