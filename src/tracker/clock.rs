use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A monotonic time reference. All time deltas in a session, for gain smoothing
/// as well as jump rejection, are computed from a single clock.
pub trait Clock {
    /// Seconds since an arbitrary, fixed origin.
    fn now_seconds(&self) -> f64;
}

/// Wall clock time since the clock was created.
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        MonotonicClock::new()
    }
}

impl Clock for MonotonicClock {
    fn now_seconds(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// A clock that only moves when told to. Clones share the same time, so a host
/// can keep a handle and advance the time seen by a session it has handed the clock to.
#[derive(Clone, Default)]
pub struct ManualClock {
    seconds_bits: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(seconds: f64) -> Self {
        ManualClock {
            seconds_bits: Arc::new(AtomicU64::new(seconds.to_bits())),
        }
    }

    pub fn set(&self, seconds: f64) {
        self.seconds_bits.store(seconds.to_bits(), Ordering::Relaxed);
    }

    pub fn advance(&self, seconds: f64) {
        self.set(self.now_seconds() + seconds);
    }
}

impl Clock for ManualClock {
    fn now_seconds(&self) -> f64 {
        f64::from_bits(self.seconds_bits.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_shared() {
        let clock = ManualClock::new(1.0);
        let handle = clock.clone();
        handle.advance(0.02);
        assert!((clock.now_seconds() - 1.02).abs() <= 1e-12);
        handle.set(5.0);
        assert_eq!(clock.now_seconds(), 5.0);
    }

    #[test]
    fn test_default_manual_clock_starts_at_zero() {
        assert_eq!(ManualClock::default().now_seconds(), 0.0);
    }

    #[test]
    fn test_monotonic_clock() {
        let clock = MonotonicClock::new();
        let first = clock.now_seconds();
        let second = clock.now_seconds();
        assert!(second >= first);
    }
}
