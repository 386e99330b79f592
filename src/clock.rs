//! Tick source and blocking delay
//!
//! Ticks are whole seconds. Sub-second precision is truncated, not rounded,
//! and frontends built on this layer pace themselves on that granularity.

use std::cell::Cell;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Seconds elapsed since the clock's origin, truncated
    fn now_ticks(&self) -> u32;

    /// Block the calling thread for `ms` milliseconds. Not cancellable.
    fn sleep(&self, ms: u32);
}

/// Monotonic clock backed by `std::time::Instant`, counting from creation
#[derive(Debug, Clone, Copy)]
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

/// Truncate a microsecond count to whole seconds
#[inline]
fn micros_to_ticks(micros: u128) -> u32 {
    (micros / 1_000_000) as u32
}

impl Clock for SystemClock {
    fn now_ticks(&self) -> u32 {
        micros_to_ticks(self.origin.elapsed().as_micros())
    }

    fn sleep(&self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }
}

/// Clock that only moves when told to.
///
/// `sleep` advances time instead of blocking, which makes frame pacing
/// deterministic for tests and for hosts whose time is driven externally.
#[derive(Debug, Default)]
pub struct ManualClock {
    elapsed_ms: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.elapsed_ms.set(self.elapsed_ms.get() + ms);
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms.get()
    }
}

impl Clock for ManualClock {
    fn now_ticks(&self) -> u32 {
        micros_to_ticks(self.elapsed_ms.get() as u128 * 1000)
    }

    fn sleep(&self, ms: u32) {
        self.advance(ms as u64);
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ticks(&self) -> u32 {
        (**self).now_ticks()
    }

    fn sleep(&self, ms: u32) {
        (**self).sleep(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_truncate_to_seconds() {
        assert_eq!(micros_to_ticks(0), 0);
        assert_eq!(micros_to_ticks(999_999), 0);
        assert_eq!(micros_to_ticks(1_000_000), 1);
        assert_eq!(micros_to_ticks(2_500_000), 2);
    }

    #[test]
    fn test_manual_clock_sleep_advances() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_ticks(), 0);
        clock.sleep(999);
        assert_eq!(clock.now_ticks(), 0);
        clock.sleep(1);
        assert_eq!(clock.now_ticks(), 1);
        clock.advance(2_400);
        assert_eq!(clock.now_ticks(), 3);
        assert_eq!(clock.elapsed_ms(), 3_400);
    }

    #[test]
    fn test_system_clock_starts_at_zero() {
        let clock = SystemClock::new();
        assert_eq!(clock.now_ticks(), 0);
        let before = Instant::now();
        clock.sleep(5);
        assert!(before.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_clock_by_reference() {
        let clock = ManualClock::new();
        let by_ref = &clock;
        by_ref.sleep(1_000);
        assert_eq!(clock.now_ticks(), 1);
    }
}
