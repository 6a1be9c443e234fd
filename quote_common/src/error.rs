//! Error types shared between client and server.
//!
//! Only the deadline failure lives here: both sides bound their suspending
//! calls with a [`Deadline`](crate::deadline::Deadline) and need to tell an
//! expired budget apart from an I/O failure. Everything else is local to the
//! crate that produces it.
use std::time::Duration;

use thiserror::Error;

/// A bounded operation did not complete before its deadline expired.
///
/// The pending future is dropped when this is returned. Dropping stops any
/// further progress on the caller's side; whether work already handed to
/// another thread or process is undone depends on the operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("deadline of {}ms exceeded", .budget.as_millis())]
pub struct DeadlineExceeded {
    /// Budget the expired deadline was minted from.
    pub budget: Duration,
}
