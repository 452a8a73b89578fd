//! Simulated network latency.

use std::time::Duration;

/// Scales the delays each route simulates.
///
/// A scale of `0.0` turns every delay into a no-op, which is what tests use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latency {
    scale: f64,
}

impl Latency {
    /// Latency multiplied by `scale`. Negative or non-finite scales disable latency.
    pub fn scaled(scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            0.0
        };
        Self { scale }
    }

    /// No latency at all.
    pub fn none() -> Self {
        Self::scaled(0.0)
    }

    /// The effective delay for a nominal `seconds`.
    pub fn delay(&self, seconds: f64) -> Duration {
        Duration::from_secs_f64(seconds * self.scale)
    }

    /// Wait for the scaled equivalent of `seconds`.
    pub async fn sleep(&self, seconds: f64) {
        let delay = self.delay(seconds);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::scaled(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_nominal_delays() {
        assert_eq!(Duration::from_millis(1100), Latency::default().delay(1.1));
        assert_eq!(Duration::from_millis(550), Latency::scaled(0.5).delay(1.1));
        assert_eq!(Duration::ZERO, Latency::none().delay(2.5));
    }

    #[test]
    fn rejects_nonsense_scales() {
        assert_eq!(Latency::none(), Latency::scaled(-1.0));
        assert_eq!(Latency::none(), Latency::scaled(f64::NAN));
        assert_eq!(Latency::none(), Latency::scaled(f64::INFINITY));
    }

    #[tokio::test(start_paused = true)]
    async fn sleeps_for_the_scaled_delay() {
        let start = tokio::time::Instant::now();
        Latency::scaled(2.0).sleep(0.75).await;
        assert_eq!(Duration::from_millis(1500), start.elapsed());
    }
}
