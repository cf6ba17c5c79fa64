//! Ukrainian postal code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PostalCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PostalCodeError {
    /// The input string is empty.
    #[error("postal code cannot be empty")]
    Empty,
    /// The input is not exactly five digits.
    #[error("postal code must be exactly {expected} digits")]
    NotFiveDigits {
        /// Required number of digits.
        expected: usize,
    },
}

/// A Ukrainian postal code: exactly five digits.
///
/// ## Examples
///
/// ```
/// use bazaar_core::PostalCode;
///
/// assert!(PostalCode::parse("01001").is_ok());
/// assert!(PostalCode::parse("0100").is_err());  // too short
/// assert!(PostalCode::parse("0100a").is_err()); // non-digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    /// Number of digits in a postal code.
    pub const DIGITS: usize = 5;

    /// Parse a `PostalCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or is not exactly five
    /// ASCII digits.
    pub fn parse(s: &str) -> Result<Self, PostalCodeError> {
        if s.is_empty() {
            return Err(PostalCodeError::Empty);
        }

        if s.len() != Self::DIGITS || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(PostalCodeError::NotFiveDigits {
                expected: Self::DIGITS,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the postal code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PostalCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PostalCode {
    type Err = PostalCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(PostalCode::parse("01001").is_ok());
        assert!(PostalCode::parse("79000").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(PostalCode::parse(""), Err(PostalCodeError::Empty)));
    }

    #[test]
    fn test_parse_four_digits_fails() {
        assert!(matches!(
            PostalCode::parse("0100"),
            Err(PostalCodeError::NotFiveDigits { expected: 5 })
        ));
    }

    #[test]
    fn test_parse_six_digits_fails() {
        assert!(PostalCode::parse("010011").is_err());
    }

    #[test]
    fn test_parse_non_digit_fails() {
        assert!(PostalCode::parse("0100a").is_err());
        assert!(PostalCode::parse("01 01").is_err());
    }

    #[test]
    fn test_display() {
        let code = PostalCode::parse("01001").unwrap();
        assert_eq!(format!("{code}"), "01001");
    }
}
