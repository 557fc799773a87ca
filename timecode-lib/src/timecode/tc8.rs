//! TC8: 3 minute precision in 8 characters, readable by a person who knows the
//! layout.
//!
//! A year is split into 24 semimonths: days 1-15 of a month, and day 16 through
//! the end of the month. Within a semimonth 25 hour slots are reserved per day
//! so the day and hour can be read off the code directly.
//!
//! | Chars | Field     | Range   | Alphabet          |
//! |-------|-----------|---------|-------------------|
//! | 0-3   | year      | 0-9999  | decimal           |
//! | 4     | semimonth | 0-23    | alpha24           |
//! | 5-6   | day/hour  | 0-399   | base20, base20    |
//! | 7     | window    | 0-19    | base20            |
use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::debug;

use super::{check_year, decode_year, split, Description, Timecode, Variant};
use crate::alphabet::{ALPHA24, BASE20};
use crate::calendar::{days_in_month, smooth};
use crate::error::{Error, Result};
use crate::radix::MixedRadix;

const SEMIMONTH: MixedRadix<1> = MixedRadix::new([&ALPHA24]);
const DAY_HOUR: MixedRadix<2> = MixedRadix::new([&BASE20, &BASE20]);
const WINDOW: MixedRadix<1> = MixedRadix::new([&BASE20]);

const FIRST_HALF_DAYS: u32 = 15;
const HOUR_SLOTS_PER_DAY: u32 = 25;
const WINDOW_MINUTES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Tc8 {
    year: u16,
    semimonth: u8,
    day_hour: u16,
    window: u8,
}

impl Tc8 {
    pub const LENGTH: usize = 8;
    pub const WINDOW_SECONDS: i64 = 180;
    pub const MAX_SEMIMONTH: i64 = 23;
    pub const MAX_DAY_HOUR: i64 = 399;
    pub const MAX_WINDOW: i64 = 19;

    /// # Errors
    /// [Error::OutOfRange] naming the first field outside its range.
    pub fn new(year: i64, semimonth: i64, day_hour: i64, window: i64) -> Result<Self> {
        let year = check_year(year)?;
        Error::check_range("semimonth", semimonth, 0, Self::MAX_SEMIMONTH)?;
        Error::check_range("day/hour", day_hour, 0, Self::MAX_DAY_HOUR)?;
        Error::check_range("window", window, 0, Self::MAX_WINDOW)?;

        Ok(Tc8 {
            year,
            semimonth: semimonth as u8,
            day_hour: day_hour as u16,
            window: window as u8,
        })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// 0 for January 1-15, 1 for January 16-31, ..., 23 for December 16-31.
    pub fn semimonth(&self) -> u8 {
        self.semimonth
    }

    pub fn day_hour(&self) -> u16 {
        self.day_hour
    }

    /// Index of the 3 minute window within the hour.
    pub fn window_of_hour(&self) -> u8 {
        self.window
    }

    /// Month, 1-12.
    pub fn month(&self) -> u32 {
        u32::from(self.semimonth) / 2 + 1
    }

    fn half(&self) -> u32 {
        u32::from(self.semimonth) % 2
    }

    /// Day of month, 1-based, as encoded. For codes no instant maps to this may
    /// be past the end of the semimonth; [Timecode::start] clamps it.
    pub fn day(&self) -> u32 {
        1 + FIRST_HALF_DAYS * self.half() + u32::from(self.day_hour) / HOUR_SLOTS_PER_DAY
    }

    /// Hour, as encoded. May be 24 for codes no instant maps to.
    pub fn hour(&self) -> u32 {
        u32::from(self.day_hour) % HOUR_SLOTS_PER_DAY
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.window) * WINDOW_MINUTES
    }

    fn last_day(&self) -> u32 {
        if self.half() == 0 {
            FIRST_HALF_DAYS
        } else {
            days_in_month(i32::from(self.year), self.month())
        }
    }
}

impl Timecode for Tc8 {
    fn of(t: &DateTime<Utc>) -> Result<Self> {
        let t = smooth(t);
        let half = u32::from(t.day() > FIRST_HALF_DAYS);
        let semimonth = t.month0() * 2 + half;
        let day_of_half = t.day() - 1 - FIRST_HALF_DAYS * half;
        let day_hour = day_of_half * HOUR_SLOTS_PER_DAY + t.hour();
        let window = t.minute() / WINDOW_MINUTES;
        debug!("{t:?} -> semimonth={semimonth} day_hour={day_hour} window={window}");

        Tc8::new(
            t.year().into(),
            semimonth.into(),
            day_hour.into(),
            window.into(),
        )
    }

    fn decode(code: &str) -> Result<Self> {
        let digits = split(code, Self::LENGTH)?;
        let year = decode_year(&digits[..4])?;
        let semimonth = SEMIMONTH.decode(&digits[4..5])?;
        let day_hour = DAY_HOUR.decode(&digits[5..7])?;
        let window = WINDOW.decode(&digits[7..])?;

        Tc8::new(year, semimonth.into(), day_hour.into(), window.into())
    }

    fn variant(&self) -> Variant {
        Variant::Tc8
    }

    fn code(&self) -> String {
        let mut code = format!("{:04}", self.year);
        SEMIMONTH.encode_into(self.semimonth.into(), &mut code);
        DAY_HOUR.encode_into(self.day_hour.into(), &mut code);
        WINDOW.encode_into(self.window.into(), &mut code);
        code
    }

    /// Codes past the end of their semimonth, or with hour 24, start at the
    /// final window (23:57) of the last day of the semimonth.
    fn start(&self) -> DateTime<Utc> {
        let (mut day, mut hour, mut minute) = (self.day(), self.hour(), self.minute());
        let last_day = self.last_day();
        if day > last_day || hour > 23 {
            debug!("{self:?} is past the end of its semimonth; clamping to its final window");
            day = day.min(last_day);
            hour = 23;
            minute = 60 - WINDOW_MINUTES;
        }

        NaiveDate::from_ymd_opt(self.year.into(), self.month(), day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .expect("clamped fields to form a valid date and time")
            .and_utc()
    }

    fn describe(&self) -> Description {
        Description::from([
            ("code", self.code()),
            ("summary", self.summary()),
            ("encoded-year", format!("{:04}", self.year)),
            ("encoded-semimonth", format!("{:02}", self.semimonth)),
            ("encoded-month", format!("{:02}", self.month())),
            ("encoded-day", format!("{:02}", self.day())),
            ("encoded-hour", format!("{:02}", self.hour())),
            ("encoded-minute", format!("{:02}", self.minute())),
        ])
    }
}
