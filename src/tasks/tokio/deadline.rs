use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Fixed execution deadline for one run
///
/// Started at the moment the process is launched. It can be neither reset
/// nor cancelled; a run that completes first simply stops waiting on it.
#[derive(Debug, Clone, Copy)]
pub struct DeadlineController {
    started_at: Instant,
    deadline: Instant,
}

impl DeadlineController {
    /// Starts the deadline clock now.
    pub fn start(timeout: Duration) -> Self {
        let started_at = Instant::now();
        Self {
            started_at,
            deadline: started_at + timeout,
        }
    }

    /// Starts the deadline clock from a timeout in milliseconds.
    pub fn from_millis(timeout_ms: u64) -> Self {
        Self::start(Duration::from_millis(timeout_ms))
    }

    /// Resolves once the deadline has passed.
    ///
    /// Waits on the absolute instant, so recreating the future on every
    /// loop iteration does not push the deadline back.
    pub async fn expired(&self) {
        sleep_until(self.deadline).await;
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
