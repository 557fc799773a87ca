//! ISO 8601 interval rendering.
use std::fmt::Write;

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

/// Clock fields of an instant, with a chrono leap second shown as second 60.
struct Clock {
    hour: u32,
    minute: u32,
    second: u32,
    millis: u32,
}

impl Clock {
    fn of(t: &DateTime<Utc>) -> Self {
        let nanos = t.nanosecond();
        Clock {
            hour: t.hour(),
            minute: t.minute(),
            second: t.second() + nanos / 1_000_000_000,
            millis: (nanos % 1_000_000_000) / 1_000_000,
        }
    }

    fn write(&self, out: &mut String, seconds: bool, millis: bool) {
        let _ = write!(out, "{:02}:{:02}", self.hour, self.minute);
        if seconds {
            let _ = write!(out, ":{:02}", self.second);
        }
        if millis {
            let _ = write!(out, ".{:03}", self.millis);
        }
    }
}

/// Render `start/end` in ISO 8601 interval syntax with the end abbreviated.
///
/// The year of `end` is left off when it matches `start`; month and day are
/// also left off when both match as well. Hour and minute are always present on
/// both ends. Seconds are shown on both ends if either end has non-zero
/// seconds, milliseconds if either end has non-zero sub-seconds.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use timecode::represent_interval;
///
/// let start = Utc.with_ymd_and_hms(2024, 6, 9, 2, 15, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 6, 9, 2, 18, 0).unwrap();
/// assert_eq!(represent_interval(&start, &end), "2024-06-09T02:15Z/02:18Z");
/// ```
pub fn represent_interval(start: &DateTime<Utc>, end: &DateTime<Utc>) -> String {
    let (a, b) = (Clock::of(start), Clock::of(end));
    let millis = a.millis != 0 || b.millis != 0;
    let seconds = millis || a.second != 0 || b.second != 0;

    let mut out = String::with_capacity(40);
    let _ = write!(
        out,
        "{:04}-{:02}-{:02}T",
        start.year(),
        start.month(),
        start.day()
    );
    a.write(&mut out, seconds, millis);
    out.push_str("Z/");

    if end.year() != start.year() {
        let _ = write!(out, "{:04}-{:02}-{:02}T", end.year(), end.month(), end.day());
    } else if (end.month(), end.day()) != (start.month(), start.day()) {
        let _ = write!(out, "{:02}-{:02}T", end.month(), end.day());
    }
    b.write(&mut out, seconds, millis);
    out.push('Z');

    out
}

/// Minimal text that, following `t` in an ISO 8601 interval, names the start of
/// the hour after `t`'s hour. Year, month and day are each included only if
/// they differ from `t`'s.
///
/// For example, for `2022-02-02T15:15Z` this is `16:00`, and for
/// `2022-02-28T23:23Z` it is `03-01T00:00`.
pub fn following_hour_minimal(t: &DateTime<Utc>) -> String {
    let following = *t + Duration::hours(1);
    let mut out = String::with_capacity(16);

    if following.year() != t.year() {
        let _ = write!(out, "{:04}-", following.year());
    }
    if following.month() != t.month() {
        let _ = write!(out, "{:02}-", following.month());
    }
    if following.day() != t.day() {
        let _ = write!(out, "{:02}T", following.day());
    }
    let _ = write!(out, "{:02}:00", following.hour());

    out
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};
    use test_case::test_case;

    use super::*;

    fn parse(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test_case("2024-06-09T02:15:00Z", "2024-06-09T02:18:00Z", "2024-06-09T02:15Z/02:18Z" ; "same day")]
    #[test_case("2024-06-09T23:57:00Z", "2024-06-10T00:00:00Z", "2024-06-09T23:57Z/06-10T00:00Z" ; "next day")]
    #[test_case("2024-06-30T23:57:00Z", "2024-07-01T00:00:00Z", "2024-06-30T23:57Z/07-01T00:00Z" ; "next month")]
    #[test_case("2024-12-31T23:57:00Z", "2025-01-01T00:00:00Z", "2024-12-31T23:57Z/2025-01-01T00:00Z" ; "next year")]
    #[test_case("2019-01-02T16:47:42Z", "2019-01-02T16:47:43Z", "2019-01-02T16:47:42Z/16:47:43Z" ; "seconds")]
    #[test_case("2019-01-02T16:47:59Z", "2019-01-02T16:48:00Z", "2019-01-02T16:47:59Z/16:48:00Z" ; "seconds on one end")]
    #[test_case("2019-01-02T16:47:42.500Z", "2019-01-02T16:47:43Z", "2019-01-02T16:47:42.500Z/16:47:43.000Z" ; "millis")]
    #[test_case("0999-03-01T00:00:00Z", "0999-03-01T00:03:00Z", "0999-03-01T00:00Z/00:03Z" ; "padded year")]
    fn interval(start: &str, end: &str, expected: &str) {
        assert_eq!(represent_interval(&parse(start), &parse(end)), expected);
    }

    #[test]
    fn interval_with_leap_second() {
        let start = NaiveDate::from_ymd_opt(2016, 12, 31)
            .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 1_000))
            .unwrap()
            .and_utc();
        let end = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(
            represent_interval(&start, &end),
            "2016-12-31T23:59:60Z/2017-01-01T00:00:00Z"
        );
    }

    #[test_case("2022-02-02T15:15:00Z", "16:00" ; "same day")]
    #[test_case("2022-02-28T23:23:00Z", "03-01T00:00" ; "next month")]
    #[test_case("2022-02-13T23:00:00Z", "14T00:00" ; "next day")]
    #[test_case("2022-12-31T23:59:59Z", "2023-01-01T00:00" ; "next year")]
    fn following_hour(t: &str, expected: &str) {
        assert_eq!(following_hour_minimal(&parse(t)), expected);
    }
}
