//! Single-threaded tick source.
//!
//! The event loop polls a `Ticker` every frame; when it reports a due tick the
//! mounted game advances one step. Pausing suspends the ticker, leaving the
//! game untouched, and unmounting cancels it for good.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickerState {
    Running,
    Suspended,
    Cancelled,
}

#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    last_tick: Instant,
    state: TickerState,
}

impl Ticker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_tick: now,
            state: TickerState::Running,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> TickerState {
        self.state
    }

    pub fn set_interval(&mut self, interval: Duration) {
        if interval != self.interval {
            log::debug!("ticker interval {:?} -> {:?}", self.interval, interval);
            self.interval = interval;
        }
    }

    /// Returns true at most once per call when a full interval has elapsed.
    ///
    /// Missed intervals are dropped instead of replayed, matching a repeating
    /// timer that simply fires late.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state != TickerState::Running {
            return false;
        }
        if now.duration_since(self.last_tick) >= self.interval {
            self.last_tick = now;
            return true;
        }
        false
    }

    pub fn suspend(&mut self) {
        if self.state == TickerState::Running {
            self.state = TickerState::Suspended;
        }
    }

    /// Restart the period from `now`. No-op unless suspended.
    pub fn resume(&mut self, now: Instant) {
        if self.state == TickerState::Suspended {
            self.state = TickerState::Running;
            self.last_tick = now;
        }
    }

    pub fn cancel(&mut self) {
        self.state = TickerState::Cancelled;
    }
}
