//! Mixed-radix integer encoding.
//!
//! A [MixedRadix] is a fixed sequence of [Alphabet]s, most significant first,
//! that together spell one bounded integer. Each timecode field is laid out as
//! one of these.
use std::fmt;

use tracing::trace;

use crate::alphabet::Alphabet;
use crate::error::Result;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MixedRadix<const N: usize> {
    digits: [&'static Alphabet; N],
}

impl<const N: usize> fmt::Debug for MixedRadix<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.digits.iter().map(|a| a.name()))
            .finish()
    }
}

impl<const N: usize> MixedRadix<N> {
    pub const fn new(digits: [&'static Alphabet; N]) -> Self {
        Self { digits }
    }

    /// Number of characters produced.
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        N
    }

    /// Number of distinct values representable, i.e., the product of the bases.
    pub const fn capacity(&self) -> u64 {
        let mut capacity = 1u64;
        let mut i = 0;
        while i < N {
            capacity *= self.digits[i].base() as u64;
            i += 1;
        }
        capacity
    }

    /// Append the digits of `value` to `out`, most significant first.
    ///
    /// # Panics
    /// If `value` does not fit, i.e., `value >= self.capacity()`. Callers
    /// range-check values before they get here.
    pub fn encode_into(&self, value: u32, out: &mut String) {
        let mut digits = ['\0'; N];
        let mut rem = value;
        for (slot, alphabet) in digits.iter_mut().zip(self.digits.iter()).rev() {
            let (shifted, digit) = alphabet.nibble(rem);
            *slot = digit;
            rem = shifted;
        }
        assert!(
            rem == 0,
            "{value} leaves {rem} after translating to {self:?}; capacity is {}",
            self.capacity()
        );
        trace!("{value} -> {digits:?}");
        out.extend(digits);
    }

    #[must_use]
    pub fn encode(&self, value: u32) -> String {
        let mut out = String::with_capacity(N);
        self.encode_into(value, &mut out);
        out
    }

    /// Decode exactly `N` digits, most significant first.
    ///
    /// # Errors
    /// [crate::Error::InvalidDigit] if a character is not in the alphabet for
    /// its position.
    ///
    /// # Panics
    /// If `digits` is not `N` characters long.
    pub fn decode(&self, digits: &[char]) -> Result<u32> {
        assert_eq!(digits.len(), N, "expected {N} digits for {self:?}");
        digits
            .iter()
            .zip(self.digits.iter())
            .try_fold(0, |partial, (c, alphabet)| alphabet.accumulate(partial, *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{ALPHA20, ALPHA24, BASE20, BASE21};
    use crate::Error;

    const HOUR: MixedRadix<3> = MixedRadix::new([&BASE20, &BASE21, &BASE21]);

    #[test]
    fn capacity() {
        assert_eq!(HOUR.capacity(), 20 * 21 * 21);
        assert_eq!(MixedRadix::new([&ALPHA20; 5]).capacity(), 3_200_000);
        assert_eq!(MixedRadix::new([&ALPHA24]).capacity(), 24);
        assert_eq!(HOUR.len(), 3);
    }

    #[test]
    fn encode_most_significant_first() {
        // 3842 = 8 * 441 + 14 * 21 + 20
        assert_eq!(HOUR.encode(3842), "MSZ");
        assert_eq!(HOUR.encode(0), "BBB");
    }

    #[test]
    fn decode_ignores_case() {
        let digits: Vec<char> = "mSz".chars().collect();
        assert_eq!(HOUR.decode(&digits), Ok(3842));
    }

    #[test]
    fn decode_rejects_digit_from_wrong_position() {
        // L is a base21 digit but not a base20 one
        let digits: Vec<char> = "LBB".chars().collect();
        assert_eq!(
            HOUR.decode(&digits),
            Err(Error::InvalidDigit {
                digit: 'L',
                alphabet: "base20"
            })
        );
        let digits: Vec<char> = "BLL".chars().collect();
        assert!(HOUR.decode(&digits).is_ok());
    }

    #[test]
    fn every_value_round_trips() {
        for value in 0..HOUR.capacity() as u32 {
            let digits: Vec<char> = HOUR.encode(value).chars().collect();
            assert_eq!(HOUR.decode(&digits), Ok(value));
        }
    }

    #[test]
    #[should_panic(expected = "leaves")]
    fn encode_past_capacity_panics() {
        let _ = HOUR.encode(HOUR.capacity() as u32);
    }
}
