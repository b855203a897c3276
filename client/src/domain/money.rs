//! Whole-naira monetary amounts and display formatting.
//!
//! The platform quotes investment amounts in whole naira, so amounts are
//! unsigned integers end to end and serialise as bare JSON numbers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum outright purchase amount, offered as the prompt default.
pub const MIN_OUTRIGHT_AMOUNT: NairaAmount = NairaAmount::new(500_000);
/// Minimum monthly financing repayment, offered as the prompt default.
pub const MIN_FINANCING_MONTHLY: NairaAmount = NairaAmount::new(50_000);

/// An amount of money in whole naira.
///
/// # Examples
/// ```
/// use client::domain::NairaAmount;
///
/// assert_eq!(NairaAmount::new(2_895_900).to_string(), "₦2,895,900");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NairaAmount(u64);

impl NairaAmount {
    /// Wrap a whole-naira value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The underlying whole-naira value.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NairaAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut reversed = String::with_capacity(digits.len() + 6);
        let mut run = 0_usize;
        for ch in digits.chars().rev() {
            if run == 3 {
                reversed.push(',');
                run = 0;
            }
            reversed.push(ch);
            run += 1;
        }
        let grouped: String = reversed.chars().rev().collect();
        write!(f, "₦{grouped}")
    }
}

impl From<NairaAmount> for u64 {
    fn from(value: NairaAmount) -> Self {
        value.0
    }
}

impl From<u64> for NairaAmount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Error returned when text does not describe a whole-naira amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("amount must be a whole number of naira")]
pub struct ParseNairaError;

impl FromStr for NairaAmount {
    type Err = ParseNairaError;

    /// Parse user-entered text, tolerating a naira sign and digit grouping.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s
            .trim()
            .trim_start_matches('₦')
            .chars()
            .filter(|ch| *ch != ',' && *ch != '_' && !ch.is_whitespace())
            .collect();
        if cleaned.is_empty() || !cleaned.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(ParseNairaError);
        }
        cleaned.parse::<u64>().map(Self).map_err(|_| ParseNairaError)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for amount formatting and parsing.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "₦0")]
    #[case(500, "₦500")]
    #[case(50_000, "₦50,000")]
    #[case(500_000, "₦500,000")]
    #[case(2_895_900, "₦2,895,900")]
    #[case(1_000_000_000, "₦1,000,000,000")]
    fn display_groups_thousands(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(NairaAmount::new(value).to_string(), expected);
    }

    #[rstest]
    #[case("500000", 500_000)]
    #[case("₦500,000", 500_000)]
    #[case("  2,895,900 ", 2_895_900)]
    #[case("0", 0)]
    fn parses_user_entered_amounts(#[case] input: &str, #[case] expected: u64) {
        let amount: NairaAmount = input.parse().expect("amount should parse");
        assert_eq!(amount.value(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("₦")]
    #[case("12.50")]
    #[case("-500")]
    #[case("abc")]
    fn rejects_non_whole_amounts(#[case] input: &str) {
        assert!(input.parse::<NairaAmount>().is_err());
    }

    #[rstest]
    fn default_minimums_match_the_prompt_defaults() {
        assert_eq!(MIN_OUTRIGHT_AMOUNT.value(), 500_000);
        assert_eq!(MIN_FINANCING_MONTHLY.value(), 50_000);
    }
}
