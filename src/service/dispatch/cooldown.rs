use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Minimum spacing between two dispatches of one command family.
///
/// Holds a single timestamp shared by every invocation of the family.
/// Concurrent check-then-mark sequences are last-write-wins.
#[derive(Debug)]
pub struct Cooldown {
    period: Duration,
    last: Mutex<Option<Instant>>,
}

impl Cooldown {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last: Mutex::new(None),
        }
    }

    /// Checks whether the family may run at `now`.
    ///
    /// # Returns
    /// - `Ok(())` - Cooldown has passed, or nothing ran yet
    /// - `Err(u64)` - Seconds left, rounded down then plus one
    pub fn check(&self, now: Instant) -> Result<(), u64> {
        let last = *self.last.lock().unwrap_or_else(|e| e.into_inner());

        match last {
            Some(last) => {
                let elapsed = now.saturating_duration_since(last);
                if elapsed >= self.period {
                    Ok(())
                } else {
                    let remaining_ms = (self.period - elapsed).as_millis() as u64;
                    Err(remaining_ms / 1000 + 1)
                }
            }
            None => Ok(()),
        }
    }

    /// Records a dispatch at `now`.
    pub fn mark(&self, now: Instant) {
        *self.last.lock().unwrap_or_else(|e| e.into_inner()) = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests a second attempt two seconds into a five second cooldown.
    ///
    /// Expected: Err(4)
    #[tokio::test(start_paused = true)]
    async fn reports_remaining_seconds() {
        let cooldown = Cooldown::new(Duration::from_secs(5));
        cooldown.mark(Instant::now());

        tokio::time::advance(Duration::from_secs(2)).await;

        assert_eq!(cooldown.check(Instant::now()), Err(4));
    }

    /// Tests the boundaries of the cooldown window.
    ///
    /// Expected: first attempt allowed, blocked just before expiry, allowed at expiry
    #[tokio::test(start_paused = true)]
    async fn allows_after_period() {
        let cooldown = Cooldown::new(Duration::from_secs(5));
        assert_eq!(cooldown.check(Instant::now()), Ok(()));

        cooldown.mark(Instant::now());
        tokio::time::advance(Duration::from_millis(4999)).await;
        assert_eq!(cooldown.check(Instant::now()), Err(1));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(cooldown.check(Instant::now()), Ok(()));
    }

    /// Tests that a zero cooldown never blocks.
    ///
    /// Expected: Ok immediately after marking
    #[tokio::test(start_paused = true)]
    async fn zero_period_never_blocks() {
        let cooldown = Cooldown::new(Duration::ZERO);
        cooldown.mark(Instant::now());

        assert_eq!(cooldown.check(Instant::now()), Ok(()));
    }
}
