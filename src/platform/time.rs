//! Fixed-interval tick pacing
//!
//! Wall-clock time only decides when the next tick starts; it never enters
//! the simulation math.

use std::time::Duration;

use crate::consts::OVERRUN_WARN_MS;

/// Schedules ticks at a fixed target interval
///
/// A tick that overruns its budget is followed immediately by the next one.
/// There is no catch-up: lost time stays lost.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    interval: Duration,
    overruns: u64,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            overruns: 0,
        }
    }

    /// Pacer for `ticks_per_second` (at least one)
    pub fn from_rate(ticks_per_second: u32) -> Self {
        let rate = ticks_per_second.max(1);
        Self::new(Duration::from_secs(1) / rate)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks so far that left less than the warning margin
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// How long to wait after a tick that took `elapsed`
    pub fn sleep_after(&mut self, elapsed: Duration) -> Duration {
        let sleep = self.interval.saturating_sub(elapsed);
        if sleep < Duration::from_millis(OVERRUN_WARN_MS) {
            self.overruns += 1;
            log::warn!(
                "Tick took {:.1} ms of a {:.1} ms budget",
                elapsed.as_secs_f64() * 1000.0,
                self.interval.as_secs_f64() * 1000.0
            );
        }
        sleep
    }
}
