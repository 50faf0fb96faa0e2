use std::time::{Duration, Instant};

/// Decides when the animation advances. Polled once per drawn frame instead of owning a thread.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    running: bool,
    last_tick: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration, running: bool) -> Self {
        Self {
            interval,
            running,
            last_tick: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts or stops the animation, returning whether it now runs.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        // Restarting fires on the next poll.
        self.last_tick = None;
        self.running
    }

    /// Whether a step is due at `now`. Records the tick when it is.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }

        let due = match self.last_tick {
            Some(last_tick) => now.saturating_duration_since(last_tick) >= self.interval,
            None => true,
        };

        if due {
            self.last_tick = Some(now);
        }

        due
    }
}
