//! Timecode variants.
//!
//! Every variant starts with the 4 digit decimal year followed by alphabetic
//! digits from the alphabets in [crate::alphabet].
//!
//! | Variant | Length | Window | Layout after the year                                 |
//! |---------|--------|--------|-------------------------------------------------------|
//! | [Tc8]   | 8      | 3 min  | semimonth (alpha24), day/hour (2 base20), window (base20) |
//! | [Tc10]  | 10     | 1 s    | 10s window of year (5 alpha20), second (decimal)      |
//! | [Year8] | 8      | 3 min  | hour of year (base20 base21 base21), window (base21)  |
//!
//! All decoding is case-insensitive. The layouts are the compatibility contract
//! of the codes; a layout change requires a new [Variant].
mod tc10;
mod tc8;
mod year8;

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{Error, Result};
use crate::interval::represent_interval;

pub use tc10::Tc10;
pub use tc8::Tc8;
pub use year8::Year8;

/// Human readable fields of a timecode, ordered by name.
pub type Description = BTreeMap<&'static str, String>;

/// Largest year any variant can encode.
pub const MAX_YEAR: i64 = 9999;

/// Capabilities shared by all timecode variants.
///
/// Implementations are small immutable value types. Constructors range-check
/// every field, so a value that exists can always be encoded.
pub trait Timecode: fmt::Debug + Send + Sync {
    /// The code whose window contains `t`.
    ///
    /// # Errors
    /// [Error::OutOfRange] if `t` is outside the years the variant can encode.
    fn of(t: &DateTime<Utc>) -> Result<Self>
    where
        Self: Sized;

    /// Decode `code`, ignoring case.
    ///
    /// # Errors
    /// [Error::InvalidLength], [Error::InvalidYear] or [Error::InvalidDigit] if
    /// `code` is malformed, or [Error::OutOfRange] if it is well formed but
    /// names a value the variant does not use.
    fn decode(code: &str) -> Result<Self>
    where
        Self: Sized;

    fn variant(&self) -> Variant;

    /// The textual code, in uppercase.
    fn code(&self) -> String;

    /// Width of the window a code covers.
    fn window(&self) -> Duration {
        self.variant().window()
    }

    /// The first instant covered by the code.
    fn start(&self) -> DateTime<Utc>;

    /// The least upper bound of instants covered by the code, i.e., the first
    /// instant after the start that is not covered.
    fn end(&self) -> DateTime<Utc> {
        self.start() + self.window()
    }

    /// The instant midway between start and end, which on average is closest to
    /// the instants mapped to the code.
    fn midpoint(&self) -> DateTime<Utc> {
        self.start() + self.window() / 2
    }

    /// Start and end in ISO 8601 interval syntax.
    fn summary(&self) -> String {
        represent_interval(&self.start(), &self.end())
    }

    /// Detailed information about the code as key/value pairs.
    fn describe(&self) -> Description;
}

/// Names a timecode layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Variant {
    #[default]
    Tc8,
    Tc10,
    Year8,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Tc8, Variant::Tc10, Variant::Year8];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Tc8 => "tc8",
            Variant::Tc10 => "tc10",
            Variant::Year8 => "year8",
        }
    }

    /// Number of characters in a code.
    #[must_use]
    pub fn length(&self) -> usize {
        match self {
            Variant::Tc8 => Tc8::LENGTH,
            Variant::Tc10 => Tc10::LENGTH,
            Variant::Year8 => Year8::LENGTH,
        }
    }

    /// Precision of a code.
    #[must_use]
    pub fn window(&self) -> Duration {
        match self {
            Variant::Tc8 => Duration::seconds(Tc8::WINDOW_SECONDS),
            Variant::Tc10 => Duration::seconds(Tc10::WINDOW_SECONDS),
            Variant::Year8 => Duration::seconds(Year8::WINDOW_SECONDS),
        }
    }

    /// Encode `t` with this variant.
    ///
    /// # Errors
    /// See [Timecode::of].
    pub fn encode(&self, t: &DateTime<Utc>) -> Result<String> {
        Ok(self.of(t)?.code())
    }

    /// Decompose `t` with this variant.
    ///
    /// # Errors
    /// See [Timecode::of].
    pub fn of(&self, t: &DateTime<Utc>) -> Result<Decoded> {
        Ok(match self {
            Variant::Tc8 => Decoded::Tc8(Tc8::of(t)?),
            Variant::Tc10 => Decoded::Tc10(Tc10::of(t)?),
            Variant::Year8 => Decoded::Year8(Year8::of(t)?),
        })
    }

    /// Decode `code` with this variant.
    ///
    /// # Errors
    /// See [Timecode::decode].
    pub fn decode(&self, code: &str) -> Result<Decoded> {
        Ok(match self {
            Variant::Tc8 => Decoded::Tc8(Tc8::decode(code)?),
            Variant::Tc10 => Decoded::Tc10(Tc10::decode(code)?),
            Variant::Year8 => Decoded::Year8(Year8::decode(code)?),
        })
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownVariant(s.to_string()))
    }
}

/// A timecode of any variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Decoded {
    Tc8(Tc8),
    Tc10(Tc10),
    Year8(Year8),
}

impl Decoded {
    #[must_use]
    pub fn as_timecode(&self) -> &dyn Timecode {
        match self {
            Decoded::Tc8(tc) => tc,
            Decoded::Tc10(tc) => tc,
            Decoded::Year8(tc) => tc,
        }
    }

    pub fn variant(&self) -> Variant {
        self.as_timecode().variant()
    }

    pub fn code(&self) -> String {
        self.as_timecode().code()
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.as_timecode().start()
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.as_timecode().end()
    }

    pub fn midpoint(&self) -> DateTime<Utc> {
        self.as_timecode().midpoint()
    }

    pub fn summary(&self) -> String {
        self.as_timecode().summary()
    }

    pub fn describe(&self) -> Description {
        self.as_timecode().describe()
    }
}

impl Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// Encode `t` as a `variant` code.
///
/// # Errors
/// [Error::OutOfRange] if `t`'s year can't be encoded.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use timecode::Variant;
///
/// let t = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(timecode::encode(Variant::Tc8, &t).unwrap(), "2019ABBB");
/// ```
pub fn encode(variant: Variant, t: &DateTime<Utc>) -> Result<String> {
    variant.encode(t)
}

/// Decode a `variant` code.
///
/// # Errors
/// If `code` is malformed for `variant`. See [Timecode::decode].
///
/// # Example
/// ```
/// use timecode::Variant;
///
/// let decoded = timecode::decode(Variant::Year8, "2024msZH").unwrap();
/// assert_eq!(decoded.summary(), "2024-06-09T02:15Z/02:18Z");
/// ```
pub fn decode(variant: Variant, code: &str) -> Result<Decoded> {
    variant.decode(code)
}

/// Decode a `variant` code and describe it.
///
/// # Errors
/// If `code` is malformed for `variant`. See [Timecode::decode].
pub fn describe(variant: Variant, code: &str) -> Result<Description> {
    Ok(variant.decode(code)?.describe())
}

/// Split `code` into characters, checking its length.
pub(crate) fn split(code: &str, expected: usize) -> Result<Vec<char>> {
    let digits: Vec<char> = code.chars().collect();
    if digits.len() != expected {
        return Err(Error::InvalidLength {
            expected,
            actual: digits.len(),
        });
    }
    Ok(digits)
}

pub(crate) fn decode_year(digits: &[char]) -> Result<i64> {
    if digits.len() != 4 || !digits.iter().all(char::is_ascii_digit) {
        return Err(Error::InvalidYear(digits.iter().collect()));
    }
    Ok(digits
        .iter()
        .filter_map(|c| c.to_digit(10))
        .fold(0, |year, d| year * 10 + i64::from(d)))
}

pub(crate) fn check_year(year: i64) -> Result<u16> {
    Error::check_range("year", year, 0, MAX_YEAR)?;
    Ok(year as u16)
}


#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::testing::utc;
    use super::*;

    #[test_case("tc8", Variant::Tc8)]
    #[test_case("TC10", Variant::Tc10)]
    #[test_case("Year8", Variant::Year8)]
    fn variant_from_str(s: &str, expected: Variant) {
        assert_eq!(s.parse::<Variant>(), Ok(expected));
        assert_eq!(expected.to_string(), s.to_lowercase());
    }

    #[test]
    fn unknown_variant() {
        assert_eq!(
            "tc9".parse::<Variant>(),
            Err(Error::UnknownVariant("tc9".to_string()))
        );
    }

    #[test]
    fn default_variant_is_tc8() {
        assert_eq!(Variant::default(), Variant::Tc8);
    }

    #[test]
    fn lengths_and_windows() {
        assert_eq!(Variant::Tc8.length(), 8);
        assert_eq!(Variant::Tc10.length(), 10);
        assert_eq!(Variant::Year8.length(), 8);
        assert_eq!(Variant::Tc8.window(), Duration::seconds(180));
        assert_eq!(Variant::Tc10.window(), Duration::seconds(1));
        assert_eq!(Variant::Year8.window(), Duration::seconds(180));
    }

    #[test]
    fn encode_each_variant() {
        let t = utc(2024, 6, 9, 2, 16, 32);
        assert_eq!(encode(Variant::Tc8, &t), Ok("2024KPDH".to_string()));
        assert_eq!(encode(Variant::Year8, &t), Ok("2024MSZH".to_string()));
        assert_eq!(encode(Variant::Tc10, &t).map(|c| c.len()), Ok(10));
    }

    #[test]
    fn decode_dispatches_on_variant() {
        let decoded = decode(Variant::Year8, "2024MSZH").unwrap();
        assert_eq!(decoded.variant(), Variant::Year8);
        assert!(matches!(decoded, Decoded::Year8(_)));
        assert_eq!(decoded.to_string(), "2024MSZH");

        // same characters, different layout
        let decoded = decode(Variant::Tc8, "2024MSZH").unwrap();
        assert_eq!(decoded.variant(), Variant::Tc8);
        assert_ne!(decoded.summary(), "2024-06-09T02:15Z/02:18Z");
    }

    #[test]
    fn decode_wrong_length_for_variant() {
        assert_eq!(
            decode(Variant::Tc10, "2024MSZH"),
            Err(Error::InvalidLength {
                expected: 10,
                actual: 8
            })
        );
    }

    #[test]
    fn describe_includes_code_and_summary() {
        for variant in Variant::ALL {
            let t = utc(2023, 3, 14, 15, 9, 26);
            let code = encode(variant, &t).unwrap();
            let description = describe(variant, &code.to_lowercase()).unwrap();

            assert_eq!(description["code"], code, "{variant}");
            assert_eq!(
                description["summary"],
                decode(variant, &code).unwrap().summary()
            );
            assert!(description["encoded-year"] == "2023");
        }
    }

    #[test_case("2024" ; "digits")]
    #[test_case("0000" ; "zero")]
    fn decode_year_ok(s: &str) {
        let digits: Vec<char> = s.chars().collect();
        assert_eq!(decode_year(&digits), Ok(s.parse::<i64>().unwrap()));
    }

    #[test_case("20x4" ; "letter")]
    #[test_case("-024" ; "sign")]
    #[test_case("２０２４" ; "fullwidth digits")]
    fn decode_year_rejects(s: &str) {
        let digits: Vec<char> = s.chars().collect();
        assert_eq!(decode_year(&digits), Err(Error::InvalidYear(s.to_string())));
    }

    #[test]
    fn split_counts_characters() {
        assert_eq!(split("2024ß", 5).map(|d| d.len()), Ok(5));
        assert_eq!(
            split("2024", 8),
            Err(Error::InvalidLength {
                expected: 8,
                actual: 4
            })
        );
    }

    #[test]
    fn decoded_as_trait_object() {
        let codes: Vec<Decoded> = Variant::ALL
            .iter()
            .map(|v| v.of(&utc(2000, 1, 1, 0, 0, 0)).unwrap())
            .collect();
        let timecodes: Vec<&dyn Timecode> = codes.iter().map(Decoded::as_timecode).collect();

        for tc in timecodes {
            assert_eq!(tc.start(), utc(2000, 1, 1, 0, 0, 0), "{tc:?}");
        }
    }
}
