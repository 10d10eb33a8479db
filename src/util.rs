use std::fmt;
use std::time::Duration;

/// Compact single-unit rendering of a duration, used for log records.
pub struct DurationDisplay(pub Duration);

impl DurationDisplay {
    pub fn from_nanos(nanos: u128) -> Self {
        const NANOS_PER_SEC: u128 = 1_000_000_000;
        let secs = (nanos / NANOS_PER_SEC).min(u64::MAX as u128) as u64;
        let subsec = (nanos % NANOS_PER_SEC) as u32;
        DurationDisplay(Duration::new(secs, subsec))
    }
}

impl fmt::Display for DurationDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= Duration::from_secs(1) {
            write!(f, "{:.3} seconds", self.0.as_secs_f64())
        } else if self.0 >= Duration::from_millis(1) {
            const NANOS_PER_MS: f64 = 1_000_000.0f64;
            write!(f, "{:.3} ms", self.0.as_nanos() as f64 / NANOS_PER_MS)
        } else if self.0 >= Duration::from_micros(1) {
            const NANOS_PER_US: f64 = 1_000.0f64;
            write!(f, "{:.3} us", self.0.as_nanos() as f64 / NANOS_PER_US)
        } else {
            write!(f, "{} ns", self.0.as_nanos())
        }
    }
}
