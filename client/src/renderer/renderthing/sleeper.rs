use std::time::{Duration, Instant};

/// Paces a loop to a target frame time.
pub struct Sleeper {
    pub target_delta_time: Duration,
    pub last_instant: Option<Instant>,
}

impl Sleeper {
    pub fn new(target_delta_time: Duration) -> Self {
        Self {
            target_delta_time,
            last_instant: None,
        }
    }

    /// Sleeps off whatever is left of the frame since the previous call. Returns whether it slept.
    pub fn sleep(&mut self) -> bool {
        let slept = match self.last_instant {
            Some(last_instant) => {
                let delta_time = last_instant.elapsed();

                if self.target_delta_time > delta_time {
                    spin_sleep::sleep(self.target_delta_time - delta_time);
                    true
                } else {
                    false
                }
            }
            // Nothing to pace against on the first frame.
            None => false,
        };

        self.last_instant = Some(Instant::now());
        slept
    }
}
