use std::thread;
use std::time::{Duration, Instant};

/// Explicit fixed-interval scheduler for the refresh loop.
///
/// Each `wait` sleeps out the remainder of the current interval, so time
/// spent fetching and redrawing does not stretch the tick grid. When a tick
/// body overruns its interval the deadline resets from now instead of
/// accumulating a backlog of instant ticks.
pub struct TickCadence {
    interval: Duration,
    next_deadline: Instant,
}

impl TickCadence {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_deadline: Instant::now() + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn wait(&mut self) {
        let now = Instant::now();
        if let Some(remaining) = self.next_deadline.checked_duration_since(now) {
            thread::sleep(remaining);
            self.next_deadline += self.interval;
        } else {
            self.next_deadline = Instant::now() + self.interval;
        }
    }
}
