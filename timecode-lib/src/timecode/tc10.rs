//! TC10: 1 second precision in 10 characters.
//!
//! | Chars | Field              | Range       | Alphabet   |
//! |-------|--------------------|-------------|------------|
//! | 0-3   | year               | 0-9999      | decimal    |
//! | 4-8   | 10s window of year | 0-3199999   | 5 x alpha20 |
//! | 9     | second of window   | 0-9         | decimal    |
use chrono::{DateTime, Duration, Utc};
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::debug;

use super::{check_year, decode_year, split, Description, Timecode, Variant};
use crate::alphabet::ALPHA20;
use crate::calendar::{seconds_in_year, start_of_year, PositionInYear};
use crate::error::{Error, Result};
use crate::radix::MixedRadix;

const WINDOW: MixedRadix<5> = MixedRadix::new([&ALPHA20; 5]);

const SECONDS_PER_WINDOW: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Tc10 {
    year: u16,
    window: u32,
    second: u8,
}

impl Tc10 {
    pub const LENGTH: usize = 10;
    pub const WINDOW_SECONDS: i64 = 1;
    pub const MAX_WINDOW: i64 = 3_199_999;
    pub const MAX_SECOND: i64 = 9;

    /// # Errors
    /// [Error::OutOfRange] naming the first field outside its range.
    pub fn new(year: i64, window: i64, second: i64) -> Result<Self> {
        let year = check_year(year)?;
        Error::check_range("window", window, 0, Self::MAX_WINDOW)?;
        Error::check_range("second", second, 0, Self::MAX_SECOND)?;

        Ok(Tc10 {
            year,
            window: window as u32,
            second: second as u8,
        })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// Index of the 10 second window within the year.
    pub fn window_of_year(&self) -> u32 {
        self.window
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    /// Seconds since the start of the year, as encoded.
    pub fn second_of_year(&self) -> i64 {
        i64::from(self.window) * SECONDS_PER_WINDOW + i64::from(self.second)
    }
}

impl Timecode for Tc10 {
    fn of(t: &DateTime<Utc>) -> Result<Self> {
        let pos = PositionInYear::of(t);
        let seconds = pos.seconds();
        debug!("{t:?} -> year={} second_of_year={seconds}", pos.year);

        Tc10::new(
            pos.year.into(),
            seconds / SECONDS_PER_WINDOW,
            seconds % SECONDS_PER_WINDOW,
        )
    }

    fn decode(code: &str) -> Result<Self> {
        let digits = split(code, Self::LENGTH)?;
        let year = decode_year(&digits[..4])?;
        let window = WINDOW.decode(&digits[4..9])?;
        let second = digits[9].to_digit(10).ok_or(Error::InvalidDigit {
            digit: digits[9],
            alphabet: "decimal",
        })?;

        Tc10::new(year, window.into(), second.into())
    }

    fn variant(&self) -> Variant {
        Variant::Tc10
    }

    fn code(&self) -> String {
        let mut code = format!("{:04}", self.year);
        WINDOW.encode_into(self.window, &mut code);
        code.push(char::from(b'0' + self.second));
        code
    }

    /// Codes past the end of the year start at its final second.
    fn start(&self) -> DateTime<Utc> {
        let year = i32::from(self.year);
        let last = seconds_in_year(year) - 1;
        let second = self.second_of_year();
        if second > last {
            debug!("{self:?} is past the end of {year}; clamping to its final second");
        }

        start_of_year(year).expect("encodable years to be representable")
            + Duration::seconds(second.min(last))
    }

    fn describe(&self) -> Description {
        Description::from([
            ("code", self.code()),
            ("summary", self.summary()),
            ("encoded-year", format!("{:04}", self.year)),
            ("encoded-window-of-10s", format!("{:07}", self.window)),
            ("encoded-second", self.second.to_string()),
        ])
    }
}
