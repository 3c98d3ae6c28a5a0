/*
 * Poll Timing
 *
 * The poll loop blocks between reads. Sleeping goes through `Sleeper` so the
 * cadence can be checked without waiting on a real clock.
 */

use core::time::Duration;

/// Blocking delay source.
pub trait Sleeper {
    /// Blocks the calling thread for roughly `duration`.
    fn sleep(&mut self, duration: Duration);
}

impl<S: Sleeper + ?Sized> Sleeper for &mut S {
    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Sleeps on the OS clock.
#[derive(Debug, Default, Copy, Clone)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
