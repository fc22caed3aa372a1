//! Periodic tick scheduling
//!
//! The UI loop polls the timer on every repaint, which on a vsync display is
//! at most once per refresh. Deadlines advance by whole intervals from the
//! previous deadline, so `poll` reports every tick that came due since the
//! last repaint and the long-run tick rate stays at 1 / interval even when
//! the interval is shorter than a refresh.

use std::time::{Duration, Instant};

/// Most ticks a single poll may report. A longer backlog is treated as a
/// stall: it is dropped and the schedule restarts from the poll instant.
pub const MAX_TICKS_PER_POLL: u32 = 8;

/// Repeating timer with a mutable interval
#[derive(Debug, Clone)]
pub struct TickTimer {
    interval: Duration,
    next_due: Instant,
}

impl TickTimer {
    /// Start a timer whose first tick is due one interval after `now`
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    /// Current interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval and restart the countdown from `now`
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.next_due = now + interval;
    }

    /// Number of ticks that came due up to `now`, advancing the schedule past them
    pub fn poll(&mut self, now: Instant) -> u32 {
        if now < self.next_due {
            return 0;
        }

        let step = self.interval.as_nanos().max(1);
        let overdue = (now - self.next_due).as_nanos() / step;
        let due = overdue.saturating_add(1);

        if due > MAX_TICKS_PER_POLL as u128 {
            tracing::debug!("Tick timer stalled, dropping {} ticks", due - 1);
            self.next_due = now + self.interval;
            return 1;
        }

        let due = due as u32;
        self.next_due += self.interval * due;
        due
    }

    /// Time left until the next tick
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}
