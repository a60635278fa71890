//! Single re-armable refresh timer.
//!
//! The timer is just a deadline; the event loop waits on it with
//! [`wait_for`] inside its `tokio::select!` and calls back into the view when
//! it passes. Arming replaces the previous deadline, so there is never more
//! than one pending tick.

use std::time::Duration;

use tokio::time::Instant;

/// Deadline used when `now + after` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

#[derive(Debug, Default)]
pub struct PollTimer {
    deadline: Option<Instant>,
}

impl PollTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, after: Duration) {
        let now = Instant::now();
        self.deadline = Some(now.checked_add(after).unwrap_or_else(|| now + FAR_FUTURE));
    }

    /// Returns whether a tick was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Sleep until `deadline`, or forever when there is none.
pub async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}
