//! Randomized inter-request pacing
//!
//! The delay between successive page fetches is the anti-blocking mechanism:
//! both chart sources rate-limit clients that request pages back to back.
//! The wait is drawn uniformly from a configured window so the request
//! rhythm never looks mechanical. Tests set the window to zero.

use std::time::Duration;

/// An inclusive `[min, max]` pacing window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    min: Duration,
    max: Duration,
}

impl Pacing {
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(max_ms),
        }
    }

    /// A window that never waits
    pub fn zero() -> Self {
        Self::from_millis(0, 0)
    }

    pub fn is_zero(&self) -> bool {
        self.max.is_zero()
    }

    /// Draws one delay from the window
    ///
    /// A degenerate window (max <= min) always yields min.
    pub fn pick(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let span_ms = (self.max - self.min).as_millis() as u64;
        self.min + Duration::from_millis(rand::random_range(0..=span_ms))
    }

    /// Sleeps for one drawn delay
    pub async fn pause(&self) {
        let delay = self.pick();
        if !delay.is_zero() {
            tracing::debug!("Pacing next request by {:?}", delay);
            tokio::time::sleep(delay).await;
        }
    }
}
