use std::time::Duration;

use rand::Rng;

/// Politeness delay before each detail fetch, drawn uniformly from
/// `[min, max)`.
pub struct Throttle {
    min: Duration,
    max: Duration,
}

impl Throttle {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        if max_ms < min_ms {
            tracing::warn!(
                "Throttle range inverted ({min_ms}..{max_ms} ms), using fixed {min_ms} ms delay"
            );
        }
        Self {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(max_ms.max(min_ms)),
        }
    }

    pub fn next_delay(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..self.max)
    }

    pub async fn wait(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tracing::debug!(delay_ms = delay.as_millis(), "Throttling before fetch");
            tokio::time::sleep(delay).await;
        }
    }
}
