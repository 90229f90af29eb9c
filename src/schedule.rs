//! Wall-clock pacing for the capture loop
//!
//! Captures are aligned to multiples of the interval measured from the loop
//! start, so time spent clicking and copying does not accumulate as drift.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Longest single sleep between checks of the stop flag
pub const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Source of elapsed time and blocking sleeps
///
/// The capture loop only talks to time through this trait so tests can run
/// it against a simulated clock.
pub trait Clock {
    /// Time elapsed since the clock was created
    fn elapsed(&self) -> Duration;

    /// Block for `duration`
    fn sleep(&mut self, duration: Duration);
}

/// Real clock backed by `Instant` and `thread::sleep`
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Time left until the next interval boundary.
///
/// Returns `interval - (elapsed mod interval)`, which is always in
/// `(0, interval]`: when `elapsed` sits exactly on a boundary, a full
/// interval is returned.
pub fn time_until_next_boundary(elapsed: Duration, interval: Duration) -> Duration {
    let interval_nanos = interval.as_nanos();
    if interval_nanos == 0 {
        return Duration::ZERO;
    }
    let into_period = elapsed.as_nanos() % interval_nanos;
    // Both values are below `interval`, so the difference fits back into a Duration.
    let remaining = interval_nanos - into_period;
    Duration::new(
        (remaining / 1_000_000_000) as u64,
        (remaining % 1_000_000_000) as u32,
    )
}

/// Sleep for `duration` in slices, returning early once `stop` is raised.
///
/// Returns `true` if the full duration elapsed, `false` if interrupted.
pub fn sleep_interruptible<C: Clock + ?Sized>(
    clock: &mut C,
    duration: Duration,
    stop: &AtomicBool,
) -> bool {
    // Measured against the clock so per-slice oversleep does not accumulate.
    let deadline = clock.elapsed() + duration;
    loop {
        if stop.load(Ordering::SeqCst) {
            return false;
        }
        let remaining = deadline.saturating_sub(clock.elapsed());
        if remaining.is_zero() {
            return true;
        }
        clock.sleep(remaining.min(SLEEP_SLICE));
    }
}
