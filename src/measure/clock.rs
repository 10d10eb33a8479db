use once_cell::sync::Lazy;
use std::time::Instant;

/// A monotonic source of timestamps in nanoseconds.
///
/// Timestamps are only meaningful relative to each other.
pub(crate) trait Clock {
    fn now(&self) -> u128;
}

static EPOCH: Lazy<Instant> = Lazy::new(Instant::now);

/// Reads `std::time::Instant`, relative to the first time any
/// `MonotonicClock` was read in this process.
pub(crate) struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> u128 {
        EPOCH.elapsed().as_nanos()
    }
}

#[cfg(test)]
pub(crate) use self::manual::ManualClock;

#[cfg(test)]
mod manual {
    use super::Clock;
    use std::cell::Cell;
    use std::time::Duration;

    /// A clock that only moves when told to.
    #[derive(Default)]
    pub(crate) struct ManualClock {
        now: Cell<u128>,
    }

    impl ManualClock {
        pub(crate) fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by.as_nanos());
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> u128 {
            self.now.get()
        }
    }
}
