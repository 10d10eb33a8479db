//! Human readable function time measuring.
//!
//! A function is wrapped with [`Measure`] (or the [`measure_time!`] macro),
//! and every call to the wrapper prints a sentence to standard output
//! describing how long the call took:
//!
//! ```text
//! The function 'load_index' took 2 seconds 13 milliseconds to run.
//! ```

pub mod error;
pub mod logging;
pub mod measure;
pub mod util;

pub use self::error::Error;
pub use self::measure::collector::{self, Collector};
pub use self::measure::format::{Breakdown, MessageFormat};
pub use self::measure::{Invoke, Measure, Measured, Options};

/// Wraps a named function with a [`Measure`], capturing the function's
/// declared name for the timing message. Paths like `jobs::rebuild` are
/// reported as `rebuild`.
///
/// ```
/// use ntropy::{measure_time, Measure, MessageFormat};
///
/// fn add(a: u32, b: u32) -> u32 {
///     a + b
/// }
///
/// let mut timed = measure_time!(add);
/// assert_eq!(timed.call((1, 2)), 3);
///
/// let timed = measure_time!(Measure::new().message_format(MessageFormat::Complete) => add);
/// assert_eq!(timed.name(), "add");
/// ```
#[macro_export]
macro_rules! measure_time {
    ($measure:expr => $func:path) => {
        $crate::Measure::wrap(
            $measure,
            $crate::measure::declared_name(stringify!($func)),
            $func,
        )
    };

    ($func:path) => {
        $crate::Measure::new().wrap($crate::measure::declared_name(stringify!($func)), $func)
    };
}
