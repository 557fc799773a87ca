//! Position of an instant relative to the start of its UTC year.
//!
//! Everything here assumes smoothed UTC: every day is exactly 86400 seconds.
//! chrono represents an inserted leap second as a nanosecond value of 10^9 or
//! more within the `:59` second; [smooth] collapses such an instant onto the
//! last nanosecond of that second before it is decomposed. Time scales that
//! smear leap seconds (UTC-SLS, most system clocks) never produce one.
use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use tracing::debug;

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const MILLIS_PER_HOUR: i64 = 3_600_000;
pub const HOURS_PER_LEAP_YEAR: i64 = 366 * 24;

/// Collapse a chrono leap second onto the preceding nanosecond.
#[must_use]
pub fn smooth(t: &DateTime<Utc>) -> DateTime<Utc> {
    if t.nanosecond() >= 1_000_000_000 {
        debug!("collapsing leap second {t:?}");
        t.with_nanosecond(999_999_999).unwrap_or(*t)
    } else {
        *t
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

pub fn seconds_in_year(year: i32) -> i64 {
    i64::from(days_in_year(year)) * SECONDS_PER_DAY
}

pub fn hours_in_year(year: i32) -> i64 {
    i64::from(days_in_year(year)) * 24
}

/// Number of days in `month` (1-12) of `year`.
///
/// # Panics
/// If `month` is not in 1-12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => panic!("month must be 1-12; got {month}"),
    }
}

/// First instant of `year`, `None` if chrono can't represent the year.
pub fn start_of_year(year: i32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// An instant as a year and the milliseconds elapsed since the year began.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionInYear {
    pub year: i32,
    pub millis: i64,
}

impl PositionInYear {
    pub fn of(t: &DateTime<Utc>) -> Self {
        let t = smooth(t);
        let year = t.year();
        // truncate to the day then move to day-of-year 1
        let beginning = t
            .date_naive()
            .with_ordinal(1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("day 1 of a representable year to be representable")
            .and_utc();
        let millis = (t - beginning).num_milliseconds();

        PositionInYear { year, millis }
    }

    /// Whole seconds since the year began.
    pub fn seconds(&self) -> i64 {
        self.millis.div_euclid(1000)
    }
}

/// A [PositionInYear] further split into the hour of the year and the
/// milliseconds within that hour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionInYearAndHour {
    pub year: i32,
    pub millis: i64,
    pub hour: u32,
    pub millis_in_hour: u32,
}

impl PositionInYearAndHour {
    pub fn of(t: &DateTime<Utc>) -> Self {
        let PositionInYear { year, millis } = PositionInYear::of(t);
        // Leap seconds have already been smoothed, so every hour is exactly
        // 3600 seconds and the hour of the year is a plain division.
        let hour = millis.div_euclid(MILLIS_PER_HOUR) as u32;
        let millis_in_hour = millis.rem_euclid(MILLIS_PER_HOUR) as u32;

        PositionInYearAndHour {
            year,
            millis,
            hour,
            millis_in_hour,
        }
    }

    /// Whole seconds since the hour began.
    pub fn seconds_in_hour(&self) -> u32 {
        self.millis_in_hour / 1000
    }
}
