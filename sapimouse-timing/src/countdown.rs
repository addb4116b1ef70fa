use crate::clock::Clock;
use std::time::Duration;

/// Outcome of polling the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// No countdown is running.
    Idle,
    /// Running, but no new whole-second boundary since the last poll.
    Pending,
    /// A new whole-second boundary was crossed.
    Second { remaining_secs: u64 },
    /// The configured duration elapsed. Reported exactly once; subsequent
    /// polls return `Idle`.
    Expired,
}

/// Session-duration countdown, polled from the event loop.
///
/// Cancellation clears the running state, so a poll that races a manual
/// stop can never resurrect a stopped session.
pub struct SessionCountdown<C: Clock> {
    clock: C,
    total: Duration,
    started_at: Option<C::Timestamp>,
    last_whole_second: Option<u64>,
}

impl<C: Clock> SessionCountdown<C> {
    pub fn new(clock: C, total: Duration) -> Self {
        Self {
            clock,
            total,
            started_at: None,
            last_whole_second: None,
        }
    }

    pub fn start(&mut self) {
        self.started_at = Some(self.clock.now());
        self.last_whole_second = None;
    }

    pub fn cancel(&mut self) {
        self.started_at = None;
        self.last_whole_second = None;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn tick(&mut self) -> CountdownTick {
        let Some(started_at) = self.started_at else {
            return CountdownTick::Idle;
        };

        let elapsed = self.clock.elapsed(started_at);
        if elapsed >= self.total {
            self.cancel();
            return CountdownTick::Expired;
        }

        let remaining_secs = (self.total - elapsed).as_secs_f64().ceil() as u64;
        if self.last_whole_second == Some(remaining_secs) {
            CountdownTick::Pending
        } else {
            self.last_whole_second = Some(remaining_secs);
            CountdownTick::Second { remaining_secs }
        }
    }
}
