//! Guess evaluation against the round's secret.

use crate::digits::Digits;
use serde::{Deserialize, Serialize};

/// Result of comparing a guess with the secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Evaluation {
    /// Exact secret guessed before its digits were identified
    LotteryWin,
    /// Number of guessed digits present anywhere in the secret (0..=3)
    Matches(u8),
}

impl Evaluation {
    /// Whether all three digits are identified (order still unknown)
    pub fn all_digits_found(&self) -> bool {
        matches!(self, Evaluation::Matches(3))
    }
}

/// Evaluate a guess made while the digits are still being found.
///
/// The lottery check comes first: a positionally identical guess wins outright
/// and never counts as an ordinary 3-match.
pub fn evaluate(guess: &Digits, secret: &Digits) -> Evaluation {
    if guess == secret {
        return Evaluation::LotteryWin;
    }
    Evaluation::Matches(match_count(guess, secret))
}

/// Order-independent count of guessed digits that appear in the secret
pub fn match_count(guess: &Digits, secret: &Digits) -> u8 {
    guess.iter().filter(|d| secret.contains(*d)).count() as u8
}

/// Guessed digits that appear in the secret, in guess order
pub fn matched_digits(guess: &Digits, secret: &Digits) -> Vec<u8> {
    guess.iter().filter(|d| secret.contains(*d)).collect()
}

/// Whether an arrangement attempt puts every digit in its place
pub fn is_exact(arrangement: &Digits, secret: &Digits) -> bool {
    arrangement == secret
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn digits(s: &str) -> Digits {
        s.parse().unwrap()
    }

    #[test]
    fn test_exact_guess_is_lottery() {
        assert_eq!(evaluate(&digits("371"), &digits("371")), Evaluation::LotteryWin);
    }

    #[test]
    fn test_reordered_guess_is_three_matches() {
        let eval = evaluate(&digits("713"), &digits("371"));
        assert_eq!(eval, Evaluation::Matches(3));
        assert!(eval.all_digits_found());
    }

    #[test]
    fn test_partial_matches() {
        let secret = digits("371");
        assert_eq!(evaluate(&digits("245"), &secret), Evaluation::Matches(0));
        assert_eq!(evaluate(&digits("345"), &secret), Evaluation::Matches(1));
        assert_eq!(evaluate(&digits("145"), &secret), Evaluation::Matches(1));
        assert_eq!(evaluate(&digits("175"), &secret), Evaluation::Matches(2));
    }

    #[test]
    fn test_matched_digits_keep_guess_order() {
        assert_eq!(matched_digits(&digits("175"), &digits("371")), vec![1, 7]);
        assert!(matched_digits(&digits("245"), &digits("371")).is_empty());
    }

    #[test]
    fn test_is_exact() {
        assert!(is_exact(&digits("371"), &digits("371")));
        assert!(!is_exact(&digits("317"), &digits("371")));
    }

    fn any_digits() -> impl Strategy<Value = Digits> {
        (1u8..=9, 1u8..=9, 1u8..=9)
            .prop_filter_map("distinct digits", |(a, b, c)| Digits::new([a, b, c]).ok())
    }

    proptest! {
        #[test]
        fn prop_match_count_is_order_independent(guess in any_digits(), secret in any_digits()) {
            let [a, b, c] = guess.as_array();
            let rotated = Digits::new([c, a, b]).unwrap();
            prop_assert_eq!(match_count(&guess, &secret), match_count(&rotated, &secret));
            prop_assert_eq!(match_count(&guess, &secret), match_count(&secret, &guess));
        }

        #[test]
        fn prop_lottery_only_for_identical(guess in any_digits(), secret in any_digits()) {
            let eval = evaluate(&guess, &secret);
            prop_assert_eq!(eval == Evaluation::LotteryWin, guess == secret);
            if let Evaluation::Matches(n) = eval {
                prop_assert!(n <= 3);
            }
        }
    }
}
