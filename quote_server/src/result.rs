//! Crate-wide result alias tying operations to the crate's process-level error.
//! Functions that can only fail in one specific way return that error type
//! explicitly, e.g. `Result<Quote, FetchError>`.

use crate::error::ServerError;

/// Convenient alias for `std::result::Result<T, ServerError>` used throughout the crate.
pub type Result<T, E = ServerError> = std::result::Result<T, E>;
