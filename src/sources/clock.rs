//! Monotonic Tick Source
//!
//! Opaque timestamps measured in nanoseconds from a process-wide epoch.
//! The epoch is fixed by the first call to [`Ticks::now`].

use std::ops::Sub;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;

static EPOCH: Lazy<Instant> = Lazy::new(Instant::now);

/// A monotonic timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ticks(u64);

impl Ticks {
    /// Returns the current timestamp.
    pub fn now() -> Self {
        let nanos = EPOCH.elapsed().as_nanos();
        Ticks(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Builds a timestamp from a raw nanosecond counter value.
    pub const fn from_nanos(nanos: u64) -> Self {
        Ticks(nanos)
    }

    /// Raw counter value in nanoseconds.
    pub const fn as_nanos(self) -> u64 {
        self.0
    }
}

/// Elapsed time between two ticks. Saturates to zero if `rhs` is later.
impl Sub for Ticks {
    type Output = Duration;

    fn sub(self, rhs: Ticks) -> Duration {
        Duration::from_nanos(self.0.saturating_sub(rhs.0))
    }
}

/// Converts an elapsed tick span to fractional milliseconds.
pub fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}
