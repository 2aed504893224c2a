use std::time::Duration;

use tokio::time::sleep;

/// Fixed delays applied between API calls to stay under provider rate limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pacing {
    /// Pause after every attempt, successful or not.
    pub call_delay: Duration,
    /// Pause after each completed row except the last.
    pub row_delay: Duration,
}

impl Pacing {
    pub fn new(call_delay: Duration, row_delay: Duration) -> Self {
        Self {
            call_delay,
            row_delay,
        }
    }

    /// No pauses at all.
    pub fn none() -> Self {
        Self::default()
    }

    pub async fn after_attempt(&self) {
        pause(self.call_delay).await;
    }

    pub async fn after_row(&self) {
        pause(self.row_delay).await;
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        sleep(delay).await;
    }
}
