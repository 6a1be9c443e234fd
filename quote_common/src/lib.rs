//!
//! Common types and utilities shared by the quote relay server and client.
//!
//! This crate aggregates:
//! - `error`: `DeadlineExceeded`, the one failure both sides share.
//! - `deadline`: explicit `Deadline` values passed to every suspending call.
//! - `quote`: the `Quote` model and the `BidResponse` wire body.
//! - `pair`: currency pairs known to the upstream provider.
//! - `net`: networking constants and small helpers.
#![warn(missing_docs)]
pub mod deadline;
pub mod error;
pub mod net;
pub mod pair;
pub mod quote;

pub use deadline::Deadline;
pub use error::DeadlineExceeded;
pub use pair::CurrencyPair;
pub use quote::{BidResponse, Quote};
