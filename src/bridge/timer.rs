//! Fixed-interval refresh timer polled by the presentation context.

use std::time::{Duration, Instant};

const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// `now + interval`, saturating at a far-future instant.
fn next_tick(now: Instant, interval: Duration) -> Instant {
    now.checked_add(interval)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

#[derive(Debug, Clone)]
pub struct RefreshTimer {
    interval: Duration,
    next_due: Instant,
}

impl RefreshTimer {
    /// First tick is due one `interval` after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: next_tick(now, interval),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// `true` at most once per interval. Missed ticks are not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = next_tick(now, self.interval);
        true
    }

    /// Push the next tick a full interval past `now`.
    pub fn reset(&mut self, now: Instant) {
        self.next_due = next_tick(now, self.interval);
    }

    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}
