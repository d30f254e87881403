//! Tick timer — the cancellable handle behind the tick cadence.
//!
//! The controller holds at most one TickTimer, and only while the
//! simulation is running. Cancelling means dropping the handle, so
//! once a pause, reset or completion returns there is nothing left
//! that could fire.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct TickTimer {
    interval: Duration,
    next_due: Instant,
    fired:    u64,
}

impl TickTimer {
    /// Arm a timer whose first firing is one interval after `now`.
    pub fn arm(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
            fired: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Number of times this handle has fired since it was armed.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Consume one firing if due. At most one firing per call: if the
    /// caller fell more than an interval behind, the cadence restarts
    /// from `now` instead of replaying the missed ticks.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.fired += 1;
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }
}
