use crate::error::Error;
use std::convert::TryFrom as _;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const NANOS_PER_MILLI: u128 = 1_000_000;
const MILLIS_PER_SEC: u128 = 1_000;
const SECS_PER_MIN: u128 = 60;
const MINS_PER_HOUR: u128 = 60;

/// The style of the sentence printed after a measured call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageFormat {
    /// `The function 'name' took 2 minutes 5 seconds to run.`
    Human,
    /// `name took 0hr 2min 5sec 0ms to run.`
    Complete,
    /// `name function took 125000000000 ns to run`
    Raw,
}

impl Default for MessageFormat {
    fn default() -> Self {
        MessageFormat::Human
    }
}

impl MessageFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageFormat::Human => "human",
            MessageFormat::Complete => "complete",
            MessageFormat::Raw => "raw",
        }
    }
}

impl fmt::Display for MessageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("human") {
            Ok(MessageFormat::Human)
        } else if s.eq_ignore_ascii_case("complete") {
            Ok(MessageFormat::Complete)
        } else if s.eq_ignore_ascii_case("raw") {
            Ok(MessageFormat::Raw)
        } else {
            Err(Error::msg(format!("`{}` is not a valid message format", s)))
        }
    }
}

/// An elapsed time split into hours, minutes, seconds and milliseconds.
///
/// Anything below a millisecond is dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Breakdown {
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
    pub milliseconds: u16,
}

impl Breakdown {
    pub fn from_nanos(nanos: u128) -> Breakdown {
        let total_millis = nanos / NANOS_PER_MILLI;

        let milliseconds = (total_millis % MILLIS_PER_SEC) as u16;
        let total_secs = total_millis / MILLIS_PER_SEC;
        let seconds = (total_secs % SECS_PER_MIN) as u8;
        let total_mins = total_secs / SECS_PER_MIN;
        let minutes = (total_mins % MINS_PER_HOUR) as u8;
        let hours = u64::try_from(total_mins / MINS_PER_HOUR).unwrap_or(u64::MAX);

        Breakdown {
            hours,
            minutes,
            seconds,
            milliseconds,
        }
    }

    pub fn from_duration(duration: Duration) -> Breakdown {
        Self::from_nanos(duration.as_nanos())
    }

    /// Total number of whole milliseconds this breakdown represents.
    pub fn total_millis(&self) -> u128 {
        let mins = self.hours as u128 * MINS_PER_HOUR + self.minutes as u128;
        let secs = mins * SECS_PER_MIN + self.seconds as u128;
        secs * MILLIS_PER_SEC + self.milliseconds as u128
    }

    pub fn is_zero(&self) -> bool {
        *self == Breakdown::default()
    }

    fn units(&self) -> [(u64, &'static str, &'static str); 4] {
        [
            (self.hours, "hour", "hours"),
            (self.minutes as u64, "minute", "minutes"),
            (self.seconds as u64, "second", "seconds"),
            (self.milliseconds as u64, "millisecond", "milliseconds"),
        ]
    }
}

/// Writes the nonzero units in descending order, e.g. `1 hour 2 seconds`, or
/// `less than one milisecond` when every unit is zero.
impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("less than one milisecond");
        }

        let mut first = true;
        for &(value, singular, plural) in self.units().iter() {
            if value == 0 {
                continue;
            }

            if !first {
                f.write_str(" ")?;
            }
            first = false;

            let unit = if value == 1 { singular } else { plural };
            write!(f, "{} {}", value, unit)?;
        }

        Ok(())
    }
}

/// Renders the sentence reported for a call to `name` that took
/// `elapsed_nanos`.
pub fn render(format: MessageFormat, name: &str, elapsed_nanos: u128) -> String {
    match format {
        MessageFormat::Human => {
            let breakdown = Breakdown::from_nanos(elapsed_nanos);
            format!("The function '{}' took {} to run.", name, breakdown)
        }

        MessageFormat::Complete => {
            let b = Breakdown::from_nanos(elapsed_nanos);
            format!(
                "{} took {}hr {}min {}sec {}ms to run.",
                name, b.hours, b.minutes, b.seconds, b.milliseconds
            )
        }

        MessageFormat::Raw => format!("{} function took {} ns to run", name, elapsed_nanos),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u128 = NANOS_PER_MILLI;

    fn human(millis: u128) -> String {
        render(MessageFormat::Human, "work", millis * MS)
    }

    #[test]
    fn breakdown_splits_units() {
        let b = Breakdown::from_nanos(7_322_045 * MS + 999_999);
        assert_eq!(
            b,
            Breakdown {
                hours: 2,
                minutes: 2,
                seconds: 2,
                milliseconds: 45,
            }
        );
    }

    #[test]
    fn breakdown_from_duration() {
        let b = Breakdown::from_duration(Duration::from_millis(61_001));
        assert_eq!((b.hours, b.minutes, b.seconds, b.milliseconds), (0, 1, 1, 1));
        assert!(Breakdown::from_duration(Duration::from_nanos(999_999)).is_zero());
    }

    #[test]
    fn breakdown_reconstructs_whole_millis() {
        for &nanos in &[
            0u128,
            999_999,
            1_000_000,
            59_999 * MS + 1,
            3_599_999 * MS,
            3_600_000 * MS,
            86_400_000 * MS + 123_456,
            987_654_321_987_654_321,
        ] {
            let b = Breakdown::from_nanos(nanos);
            assert_eq!(b.total_millis(), nanos / MS, "nanos = {}", nanos);
            assert!(b.minutes < 60 && b.seconds < 60 && b.milliseconds < 1000);
        }
    }

    #[test]
    fn breakdown_is_monotonic() {
        let mut last = 0;
        for step in 0..5_000u128 {
            let total = Breakdown::from_nanos(step * 7_919 * 100_003).total_millis();
            assert!(total >= last);
            last = total;
        }
    }

    #[test]
    fn human_uses_singular_for_one() {
        assert_eq!(human(3_600_000), "The function 'work' took 1 hour to run.");
        assert_eq!(human(60_000), "The function 'work' took 1 minute to run.");
        assert_eq!(human(1_000), "The function 'work' took 1 second to run.");
        assert_eq!(human(1), "The function 'work' took 1 millisecond to run.");
    }

    #[test]
    fn human_uses_plural_and_keeps_unit_order() {
        assert_eq!(
            human(7_322_000),
            "The function 'work' took 2 hours 2 minutes 2 seconds to run."
        );
        assert_eq!(
            human(3_600_000 + 250),
            "The function 'work' took 1 hour 250 milliseconds to run."
        );
    }

    #[test]
    fn human_plural_only_appears_as_its_own_word() {
        let out = human(1_005);
        assert_eq!(out, "The function 'work' took 1 second 5 milliseconds to run.");
        assert!(!out.contains(" seconds "));
    }

    #[test]
    fn human_omits_zero_units() {
        let out = human(3_600_000);
        for word in &["hours", "minute", "second"] {
            assert!(!out.contains(word), "unexpected `{}` in {:?}", word, out);
        }

        let out = human(120_000);
        assert!(out.contains("2 minutes"));
        assert!(!out.contains("hour"));
        assert!(!out.contains("second"));
    }

    #[test]
    fn human_below_one_millisecond() {
        let out = render(MessageFormat::Human, "fast", 999_999);
        assert_eq!(out, "The function 'fast' took less than one milisecond to run.");
    }

    #[test]
    fn complete_always_shows_every_unit() {
        assert_eq!(
            render(MessageFormat::Complete, "work", 0),
            "work took 0hr 0min 0sec 0ms to run."
        );
        assert_eq!(
            render(MessageFormat::Complete, "work", 7_322_045 * MS),
            "work took 2hr 2min 2sec 45ms to run."
        );
    }

    #[test]
    fn raw_reports_nanoseconds() {
        assert_eq!(
            render(MessageFormat::Raw, "work", 1_234),
            "work function took 1234 ns to run"
        );
    }

    #[test]
    fn parse_message_format() {
        assert_eq!("human".parse::<MessageFormat>().unwrap(), MessageFormat::Human);
        assert_eq!("Complete".parse::<MessageFormat>().unwrap(), MessageFormat::Complete);
        assert_eq!("RAW".parse::<MessageFormat>().unwrap(), MessageFormat::Raw);

        let err = "verbose".parse::<MessageFormat>().unwrap_err();
        assert_eq!(err.to_string(), "`verbose` is not a valid message format");
    }

    #[test]
    fn message_format_display_round_trips() {
        for &format in &[MessageFormat::Human, MessageFormat::Complete, MessageFormat::Raw] {
            assert_eq!(format.to_string().parse::<MessageFormat>().unwrap(), format);
        }
    }
}
