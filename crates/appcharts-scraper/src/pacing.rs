//! Politeness delays between sequential requests.
//!
//! Callers hold a [`Pacer`] instead of sleeping directly, so tests can pass
//! [`NoPause`] and run without waiting.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use rand::Rng;

pub type PauseFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// A delay strategy awaited between requests.
pub trait Pacer: Send + Sync {
    fn pause(&self) -> PauseFuture<'_>;
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

impl Pacer for NoPause {
    fn pause(&self) -> PauseFuture<'_> {
        Box::pin(std::future::ready(()))
    }
}

/// Waits the same duration every time.
#[derive(Debug, Clone, Copy)]
pub struct FixedPause(pub Duration);

impl FixedPause {
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }
}

impl Pacer for FixedPause {
    fn pause(&self) -> PauseFuture<'_> {
        let delay = self.0;
        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        })
    }
}

/// Waits a uniformly random duration in `[min, max]`.
#[derive(Debug, Clone, Copy)]
pub struct JitterPause {
    min: Duration,
    max: Duration,
}

impl JitterPause {
    /// Bounds are swapped if given in the wrong order.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    #[must_use]
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    /// Draws the next delay without sleeping.
    #[must_use]
    pub fn next_delay(&self) -> Duration {
        let min_ms = u64::try_from(self.min.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max.as_millis()).unwrap_or(u64::MAX);
        if min_ms == max_ms {
            return self.min;
        }
        Duration::from_millis(rand::rng().random_range(min_ms..=max_ms))
    }
}

impl Pacer for JitterPause {
    fn pause(&self) -> PauseFuture<'_> {
        let delay = self.next_delay();
        Box::pin(async move {
            tracing::debug!(delay_ms = delay.as_millis(), "pausing before next page");
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_delay_stays_within_bounds() {
        let pacer = JitterPause::from_millis(2000, 5000);
        for _ in 0..200 {
            let d = pacer.next_delay();
            assert!(d >= Duration::from_millis(2000), "{d:?} below minimum");
            assert!(d <= Duration::from_millis(5000), "{d:?} above maximum");
        }
    }

    #[test]
    fn jitter_swaps_inverted_bounds() {
        let pacer = JitterPause::from_millis(50, 10);
        let d = pacer.next_delay();
        assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(50));
    }

    #[test]
    fn jitter_with_equal_bounds_is_constant() {
        let pacer = JitterPause::from_millis(7, 7);
        assert_eq!(pacer.next_delay(), Duration::from_millis(7));
    }

    #[tokio::test]
    async fn no_pause_completes_immediately() {
        let started = std::time::Instant::now();
        NoPause.pause().await;
        assert!(started.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn fixed_pause_sleeps_for_its_duration() {
        let started = tokio::time::Instant::now();
        FixedPause::from_millis(20).pause().await;
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
