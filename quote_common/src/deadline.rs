//! Explicit deadline values threaded through every suspending call.
//!
//! Each hop mints its own `Deadline` from its own budget and passes it down as
//! a plain argument. A deadline is never inherited from an inbound request, so
//! a caller with a generous budget cannot stretch the relay's upstream call
//! and a slow store cannot eat into the response path.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::DeadlineExceeded;

/// Absolute expiry instant together with the budget it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at: Instant,
    budget: Duration,
}

impl Deadline {
    /// Deadline that expires `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
            budget,
        }
    }

    /// Budget this deadline was created with.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Whether the expiry instant has passed.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Drive `fut` until it completes or the deadline expires.
    ///
    /// On expiry the future is dropped, which cancels whatever I/O it had in
    /// flight, and `DeadlineExceeded` is returned.
    pub async fn run<F>(self, fut: F) -> Result<F::Output, DeadlineExceeded>
    where
        F: Future,
    {
        tokio::time::timeout_at(self.expires_at, fut)
            .await
            .map_err(|_| DeadlineExceeded {
                budget: self.budget,
            })
    }
}
