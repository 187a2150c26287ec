//! Three-digit values used for secrets and guesses.
//!
//! A [`Digits`] value always holds exactly three mutually distinct digits in
//! `1..=9`. The only ways to build one are validated constructors, so the rest
//! of the engine never has to re-check the domain.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of digits in a secret or guess
pub const DIGIT_COUNT: usize = 3;

/// Smallest allowed digit
pub const MIN_DIGIT: u8 = 1;

/// Largest allowed digit
pub const MAX_DIGIT: u8 = 9;

/// Reasons a secret or guess can be rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DigitError {
    #[error("Please enter all three digits")]
    WrongLength(usize),

    #[error("Please enter digits 1-9")]
    NotADigit(char),

    #[error("Please enter digits 1-9")]
    OutOfRange(u8),

    #[error("All three digits must be unique!")]
    Duplicate(u8),
}

/// Three distinct digits from 1 to 9, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 3]", into = "[u8; 3]")]
pub struct Digits([u8; DIGIT_COUNT]);

impl Digits {
    /// Validate three digits
    pub fn new(digits: [u8; DIGIT_COUNT]) -> Result<Self, DigitError> {
        if let Some(&d) = digits.iter().find(|d| !(MIN_DIGIT..=MAX_DIGIT).contains(*d)) {
            return Err(DigitError::OutOfRange(d));
        }

        for (i, d) in digits.iter().enumerate() {
            if digits[..i].contains(d) {
                return Err(DigitError::Duplicate(*d));
            }
        }

        Ok(Self(digits))
    }

    /// Draw three digits without replacement, uniform over all 504 orderings
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut pool = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        let (picked, _) = pool.partial_shuffle(rng, DIGIT_COUNT);
        Self([picked[0], picked[1], picked[2]])
    }

    /// The digits as an array
    pub fn as_array(&self) -> [u8; DIGIT_COUNT] {
        self.0
    }

    /// Digit at a position (0..3)
    pub fn get(&self, position: usize) -> Option<u8> {
        self.0.get(position).copied()
    }

    /// Whether the digit appears at any position
    pub fn contains(&self, digit: u8) -> bool {
        self.0.contains(&digit)
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

impl TryFrom<[u8; DIGIT_COUNT]> for Digits {
    type Error = DigitError;

    fn try_from(digits: [u8; DIGIT_COUNT]) -> Result<Self, Self::Error> {
        Self::new(digits)
    }
}

impl From<Digits> for [u8; DIGIT_COUNT] {
    fn from(digits: Digits) -> Self {
        digits.0
    }
}

impl FromStr for Digits {
    type Err = DigitError;

    /// Parse typed input such as `"371"` or `"3 7 1"`. Whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != DIGIT_COUNT {
            return Err(DigitError::WrongLength(chars.len()));
        }

        let mut digits = [0u8; DIGIT_COUNT];
        for (slot, c) in digits.iter_mut().zip(&chars) {
            let value = c.to_digit(10).ok_or(DigitError::NotADigit(*c))?;
            *slot = value as u8;
        }

        Self::new(digits)
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.0[0], self.0[1], self.0[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_parse_valid_input() {
        let digits: Digits = "371".parse().unwrap();
        assert_eq!(digits.as_array(), [3, 7, 1]);

        let spaced: Digits = " 3 7 1 ".parse().unwrap();
        assert_eq!(spaced, digits);
        assert_eq!(digits.to_string(), "371");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("37".parse::<Digits>(), Err(DigitError::WrongLength(2)));
        assert_eq!("3712".parse::<Digits>(), Err(DigitError::WrongLength(4)));
        assert_eq!("3x1".parse::<Digits>(), Err(DigitError::NotADigit('x')));
        assert_eq!("301".parse::<Digits>(), Err(DigitError::OutOfRange(0)));
        assert_eq!("373".parse::<Digits>(), Err(DigitError::Duplicate(3)));
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(Digits::new([1, 2, 10]), Err(DigitError::OutOfRange(10)));
        assert_eq!(Digits::new([0, 2, 3]), Err(DigitError::OutOfRange(0)));
        assert_eq!(Digits::new([4, 4, 5]), Err(DigitError::Duplicate(4)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(DigitError::NotADigit('a').to_string(), "Please enter digits 1-9");
        assert_eq!(
            DigitError::Duplicate(2).to_string(),
            "All three digits must be unique!"
        );
    }

    #[test]
    fn test_serde_rejects_invalid_digits() {
        let ok: Digits = serde_json::from_str("[9,1,5]").unwrap();
        assert_eq!(ok.as_array(), [9, 1, 5]);
        assert_eq!(serde_json::to_string(&ok).unwrap(), "[9,1,5]");

        assert!(serde_json::from_str::<Digits>("[9,9,5]").is_err());
    }

    #[test]
    fn test_random_secrets_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let secret = Digits::random(&mut rng);
            assert!(Digits::new(secret.as_array()).is_ok());
        }
    }

    #[test]
    fn test_random_covers_permutations_uniformly() {
        let mut rng = StdRng::seed_from_u64(42);
        let per_permutation = 200;
        let draws = 504 * per_permutation;

        let mut counts: HashMap<[u8; 3], u32> = HashMap::new();
        for _ in 0..draws {
            *counts.entry(Digits::random(&mut rng).as_array()).or_default() += 1;
        }

        assert_eq!(counts.len(), 504, "every ordering should appear");
        for (digits, count) in &counts {
            assert!(
                (100..=300).contains(count),
                "{:?} drawn {} times, expected about {}",
                digits,
                count,
                per_permutation
            );
        }
    }

    proptest! {
        #[test]
        fn prop_parse_matches_new(a in 0u8..=9, b in 0u8..=9, c in 0u8..=9) {
            let text = format!("{}{}{}", a, b, c);
            prop_assert_eq!(text.parse::<Digits>(), Digits::new([a, b, c]));
        }

        #[test]
        fn prop_valid_digits_are_distinct_and_in_range(a in 1u8..=9, b in 1u8..=9, c in 1u8..=9) {
            match Digits::new([a, b, c]) {
                Ok(d) => {
                    let arr = d.as_array();
                    prop_assert!(arr[0] != arr[1] && arr[1] != arr[2] && arr[0] != arr[2]);
                }
                Err(e) => prop_assert!(matches!(e, DigitError::Duplicate(_))),
            }
        }
    }
}
