//! Year8: 3 minute precision in 8 characters, counting hours from the start
//! of the year.
//!
//! | Chars | Field        | Range  | Alphabet               |
//! |-------|--------------|--------|------------------------|
//! | 0-3   | year         | 0-9999 | decimal                |
//! | 4-6   | hour of year | 0-8783 | base20, base21, base21 |
//! | 7     | window       | 0-20   | base21                 |
//!
//! Windows 0-19 are the 3 minute windows of the hour. Window 20 is reserved
//! for an inserted leap second, `HH:59:60`, at the end of the hour.
use chrono::{DateTime, Duration, Timelike, Utc};
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::debug;

use super::{check_year, decode_year, split, Description, Timecode, Variant};
use crate::alphabet::{BASE20, BASE21};
use crate::calendar::{
    hours_in_year, start_of_year, PositionInYearAndHour, HOURS_PER_LEAP_YEAR,
};
use crate::error::{Error, Result};
use crate::interval::{following_hour_minimal, represent_interval};
use crate::radix::MixedRadix;

const HOUR: MixedRadix<3> = MixedRadix::new([&BASE20, &BASE21, &BASE21]);
const WINDOW: MixedRadix<1> = MixedRadix::new([&BASE21]);

const MILLIS_PER_WINDOW: u32 = 180_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Year8 {
    year: u16,
    hour: u16,
    window: u8,
}

impl Year8 {
    pub const LENGTH: usize = 8;
    pub const WINDOW_SECONDS: i64 = 180;
    pub const MAX_HOUR: i64 = HOURS_PER_LEAP_YEAR - 1;
    pub const MAX_WINDOW: i64 = 20;
    /// Window of the leap second at the end of an hour.
    pub const LEAP_WINDOW: u8 = 20;

    /// # Errors
    /// [Error::OutOfRange] naming the first field outside its range.
    pub fn new(year: i64, hour: i64, window: i64) -> Result<Self> {
        let year = check_year(year)?;
        Error::check_range("hour", hour, 0, Self::MAX_HOUR)?;
        Error::check_range("window", window, 0, Self::MAX_WINDOW)?;

        Ok(Year8 {
            year,
            hour: hour as u16,
            window: window as u8,
        })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn hour_of_year(&self) -> u16 {
        self.hour
    }

    pub fn window_of_hour(&self) -> u8 {
        self.window
    }

    pub fn is_leap_second(&self) -> bool {
        self.window == Self::LEAP_WINDOW
    }

    /// Start of the encoded hour. Hours past the end of a common year clamp to
    /// its final hour.
    fn hour_start(&self) -> DateTime<Utc> {
        let year = i32::from(self.year);
        let last = hours_in_year(year) - 1;
        let hour = i64::from(self.hour);
        if hour > last {
            debug!("{self:?} is past the end of {year}; clamping to its final hour");
        }

        start_of_year(year).expect("encodable years to be representable")
            + Duration::hours(hour.min(last))
    }

    /// `millis` into the leap second at the end of the hour starting at `hour`.
    fn leap_second(hour: &DateTime<Utc>, millis: u32) -> DateTime<Utc> {
        hour.date_naive()
            .and_hms_milli_opt(hour.hour(), 59, 59, 1_000 + millis)
            .expect("leap second to be representable at the end of any hour")
            .and_utc()
    }
}

impl Timecode for Year8 {
    fn of(t: &DateTime<Utc>) -> Result<Self> {
        let pos = PositionInYearAndHour::of(t);
        let window = pos.millis_in_hour / MILLIS_PER_WINDOW;
        debug!("{t:?} -> hour={} window={window}", pos.hour);

        Year8::new(pos.year.into(), pos.hour.into(), window.into())
    }

    fn decode(code: &str) -> Result<Self> {
        let digits = split(code, Self::LENGTH)?;
        let year = decode_year(&digits[..4])?;
        let hour = HOUR.decode(&digits[4..7])?;
        let window = WINDOW.decode(&digits[7..])?;

        Year8::new(year, hour.into(), window.into())
    }

    fn variant(&self) -> Variant {
        Variant::Year8
    }

    fn code(&self) -> String {
        let mut code = format!("{:04}", self.year);
        HOUR.encode_into(self.hour.into(), &mut code);
        WINDOW.encode_into(self.window.into(), &mut code);
        code
    }

    fn start(&self) -> DateTime<Utc> {
        let hour = self.hour_start();
        if self.is_leap_second() {
            Self::leap_second(&hour, 0)
        } else {
            hour + Duration::seconds(Self::WINDOW_SECONDS * i64::from(self.window))
        }
    }

    fn end(&self) -> DateTime<Utc> {
        if self.is_leap_second() {
            self.hour_start() + Duration::hours(1)
        } else {
            self.start() + self.window()
        }
    }

    fn midpoint(&self) -> DateTime<Utc> {
        if self.is_leap_second() {
            Self::leap_second(&self.hour_start(), 500)
        } else {
            self.start() + self.window() / 2
        }
    }

    /// The last two windows of an hour end at the following hour, which is
    /// written minimally relative to the start of the hour.
    fn summary(&self) -> String {
        let hour = self.hour_start();
        let from = match self.window {
            Self::LEAP_WINDOW => "59:60",
            w if i64::from(w) == Self::MAX_WINDOW - 1 => "57",
            _ => return represent_interval(&self.start(), &self.end()),
        };
        format!(
            "{}:{from}Z/{}Z",
            hour.format("%Y-%m-%dT%H"),
            following_hour_minimal(&hour)
        )
    }

    fn describe(&self) -> Description {
        Description::from([
            ("code", self.code()),
            ("summary", self.summary()),
            ("encoded-year", format!("{:04}", self.year)),
            ("encoded-hour-of-year", format!("{:04}", self.hour)),
            ("encoded-window-of-3m", format!("{:02}", self.window)),
        ])
    }
}
