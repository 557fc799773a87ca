//! Digit alphabets.
//!
//! Each alphabet is a numeral system of a fixed base whose digits are
//! uppercase ASCII letters. Vowels are left out of the consonant alphabets so
//! codes do not spell words, and so `I` and `O` can't be mistaken for `1` and
//! `0`. Decoding is case-insensitive; encoding always emits uppercase.
//!
//! The character sets are part of the code format. Changing one changes the
//! meaning of every code already issued with it.
use crate::error::{Error, Result};

/// A fixed, ordered set of unique digit characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    name: &'static str,
    digits: &'static str,
}

/// Consonants without `Y`. Used for the TC10 window digits.
pub const ALPHA20: Alphabet = Alphabet::new("alpha20", "BCDFGHJKLMNPQRSTVWXZ");

/// Consonants without `L`, which is easily confused with `1`. Used for the
/// TC8 day/hour and window digits and the leading Year8 hour digit.
pub const BASE20: Alphabet = Alphabet::new("base20", "BCDFGHJKMNPQRSTVWXYZ");

/// All 21 consonants. Like [BASE20] but allows `L`.
pub const BASE21: Alphabet = Alphabet::new("base21", "BCDFGHJKLMNPQRSTVWXYZ");

/// `A` through `X`. Only used for the single TC8 semimonth letter, where the
/// position is always alphabetic so vowels can't be confused with digits.
pub const ALPHA24: Alphabet = Alphabet::new("alpha24", "ABCDEFGHIJKLMNOPQRSTUVWX");

impl Alphabet {
    /// `digits` must be unique uppercase ASCII characters.
    pub const fn new(name: &'static str, digits: &'static str) -> Self {
        Self { name, digits }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn base(&self) -> u32 {
        self.digits.len() as u32
    }

    pub fn digits(&self) -> &'static str {
        self.digits
    }

    /// Return the number shifted right by one digit in this base, and the least
    /// significant digit as a character.
    #[must_use]
    pub fn nibble(&self, i: u32) -> (u32, char) {
        let base = self.base();
        let digit = (i % base) as usize;
        (i / base, char::from(self.digits.as_bytes()[digit]))
    }

    /// Value of `c` in this base, ignoring case.
    pub fn index_of(&self, c: char) -> Option<u32> {
        if !c.is_ascii() {
            return None;
        }
        let upper = c.to_ascii_uppercase() as u8;
        self.digits
            .bytes()
            .position(|b| b == upper)
            .map(|idx| idx as u32)
    }

    /// Build up a number one digit at a time from the left: `partial` is
    /// shifted left by one digit in this base and the value of `c` is added.
    ///
    /// # Errors
    /// [Error::InvalidDigit] if `c` is not a digit of this alphabet, or
    /// [Error::Overflow] if the result does not fit in a `u32`.
    pub fn accumulate(&self, partial: u32, c: char) -> Result<u32> {
        let Some(value) = self.index_of(c) else {
            return Err(Error::InvalidDigit {
                digit: c,
                alphabet: self.name,
            });
        };
        partial
            .checked_mul(self.base())
            .and_then(|shifted| shifted.checked_add(value))
            .ok_or(Error::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use test_case::test_case;

    use super::*;

    const ALL: [Alphabet; 4] = [ALPHA20, BASE20, BASE21, ALPHA24];

    #[test]
    fn digits_are_unique_uppercase_ascii() {
        for alphabet in ALL {
            let unique: HashSet<u8> = alphabet.digits().bytes().collect();
            assert_eq!(
                unique.len(),
                alphabet.base() as usize,
                "duplicate digit in {}",
                alphabet.name()
            );
            assert!(
                alphabet.digits().bytes().all(|b| b.is_ascii_uppercase()),
                "{} has a non-uppercase digit",
                alphabet.name()
            );
        }
    }

    #[test_case(ALPHA20, 20)]
    #[test_case(BASE20, 20)]
    #[test_case(BASE21, 21)]
    #[test_case(ALPHA24, 24)]
    fn base(alphabet: Alphabet, expected: u32) {
        assert_eq!(alphabet.base(), expected);
    }

    #[test]
    fn consonant_alphabets_have_no_vowels() {
        for alphabet in [ALPHA20, BASE20, BASE21] {
            for vowel in ['A', 'E', 'I', 'O', 'U'] {
                assert_eq!(alphabet.index_of(vowel), None, "{}", alphabet.name());
            }
        }
        assert_eq!(BASE20.index_of('L'), None);
        assert_eq!(ALPHA20.index_of('Y'), None);
    }

    #[test]
    fn nibble() {
        assert_eq!(BASE20.nibble(0), (0, 'B'));
        assert_eq!(BASE20.nibble(227), (11, 'K'));
        assert_eq!(BASE21.nibble(20), (0, 'Z'));
        assert_eq!(ALPHA24.nibble(10), (0, 'K'));
    }

    #[test]
    fn accumulate_ignores_case() {
        assert_eq!(BASE20.accumulate(11, 'K'), Ok(227));
        assert_eq!(BASE20.accumulate(11, 'k'), Ok(227));
        assert_eq!(ALPHA24.accumulate(0, 'x'), Ok(23));
    }

    #[test_case(BASE20, 'L' ; "l not in base20")]
    #[test_case(ALPHA20, 'Y' ; "y not in alpha20")]
    #[test_case(BASE21, 'A' ; "vowel")]
    #[test_case(ALPHA24, 'Z' ; "z not in alpha24")]
    #[test_case(BASE21, '7' ; "decimal digit")]
    #[test_case(BASE21, 'ß' ; "non ascii")]
    fn accumulate_rejects(alphabet: Alphabet, c: char) {
        assert_eq!(
            alphabet.accumulate(0, c),
            Err(Error::InvalidDigit {
                digit: c,
                alphabet: alphabet.name(),
            })
        );
    }

    #[test]
    fn accumulate_overflow() {
        assert_eq!(BASE21.accumulate(u32::MAX / 2, 'B'), Err(Error::Overflow));
    }

    #[test]
    fn nibbles_reaccumulate_for_every_two_digit_value() {
        for alphabet in ALL {
            let base = alphabet.base();
            for i in 0..base * base {
                let (rem, low) = alphabet.nibble(i);
                let (rem, high) = alphabet.nibble(rem);
                assert_eq!(rem, 0);

                let value = alphabet
                    .accumulate(0, high)
                    .and_then(|partial| alphabet.accumulate(partial, low))
                    .unwrap();
                assert_eq!(value, i, "{} round trip of {i}", alphabet.name());
            }
        }
    }
}
