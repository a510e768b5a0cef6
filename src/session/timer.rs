use std::time::{Duration, Instant};

/// Fixed-interval tick scheduler driven by a monotonic clock.
///
/// Like a UI dispatcher timer it never bursts: ticks missed while the host was busy are
/// coalesced into one, and the schedule realigns to the interval grid.
#[derive(Clone, Debug)]
pub struct FrameTimer {
    interval: Duration,
    next: Option<Instant>,
}

impl FrameTimer {
    /// Stopped timer with the given interval (clamped to at least 1 ms).
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next: None,
        }
    }

    /// Current interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Return `true` while the timer is running.
    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Start ticking; the first tick is due one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.interval);
    }

    /// Stop ticking.
    pub fn stop(&mut self) {
        self.next = None;
    }

    /// Change the interval. A running timer reschedules its next tick from `now`.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval.max(Duration::from_millis(1));
        if self.next.is_some() {
            self.next = Some(now + self.interval);
        }
    }

    /// Return `true` when a tick is due at `now`, and schedule the following one.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(next) = self.next else {
            return false;
        };
        if now < next {
            return false;
        }
        let late = now.duration_since(next);
        let skipped = (late.as_nanos() / self.interval.as_nanos()) as u32;
        self.next = Some(next + self.interval * (skipped + 1));
        true
    }

    /// Time left until the next tick, or `None` when stopped.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next.map(|n| n.saturating_duration_since(now))
    }
}
