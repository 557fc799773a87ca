#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A descriptor field is outside the range its layout can represent.
    #[error("{field} must be in [{min}, {max}]; got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("expected a {expected} character code; got {actual} characters")]
    InvalidLength { expected: usize, actual: usize },

    #[error("year segment must be 4 decimal digits; got {0:?}")]
    InvalidYear(String),

    /// A character is not a member of the alphabet used at its position.
    #[error("invalid {alphabet} digit {digit:?}")]
    InvalidDigit { digit: char, alphabet: &'static str },

    #[error("Overflow")]
    Overflow,

    #[error("unknown timecode variant {0:?}; expected one of tc8, tc10, year8")]
    UnknownVariant(String),
}

impl Error {
    pub(crate) fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<()> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                field,
                value,
                min,
                max,
            })
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
