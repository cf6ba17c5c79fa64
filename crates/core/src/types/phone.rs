//! Ukrainian phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty (after removing whitespace).
    #[error("phone cannot be empty")]
    Empty,
    /// The number does not start with the Ukrainian country/trunk prefix.
    #[error("phone must start with +380, 380 or 30")]
    InvalidPrefix,
    /// The subscriber part is not exactly nine digits.
    #[error("phone must have 9 digits after the leading 0")]
    InvalidSubscriber,
}

/// A Ukrainian phone number.
///
/// Accepts the forms the checkout form accepts: an optional `+`, the
/// country code `38` (the `8` may be omitted), a leading `0`, and nine
/// subscriber digits. Whitespace is removed before parsing, so masked
/// input like `+38 050 123 45 67` is accepted.
///
/// ## Examples
///
/// ```
/// use bazaar_core::PhoneNumber;
///
/// assert!(PhoneNumber::parse("+380501234567").is_ok());
/// assert!(PhoneNumber::parse("+38 050 123 45 67").is_ok());
/// assert!(PhoneNumber::parse("380501234567").is_ok());
///
/// assert!(PhoneNumber::parse("0501234567").is_err()); // no country code
/// assert!(PhoneNumber::parse("12345").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse a `PhoneNumber` from a string.
    ///
    /// Whitespace is stripped first; the compact form is what gets stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, lacks the `+?3(8)?0`
    /// prefix, or does not carry exactly nine subscriber digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        if compact.is_empty() {
            return Err(PhoneError::Empty);
        }

        let rest = compact.strip_prefix('+').unwrap_or(&compact);
        let rest = rest.strip_prefix('3').ok_or(PhoneError::InvalidPrefix)?;
        let rest = rest.strip_prefix('8').unwrap_or(rest);
        let rest = rest.strip_prefix('0').ok_or(PhoneError::InvalidPrefix)?;

        if rest.len() != 9 || !rest.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::InvalidSubscriber);
        }

        Ok(Self(compact))
    }

    /// Returns the compact phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Display mask used by the checkout form: digit groups of
    /// 2, 3, 3, 2 and 2 behind a leading `+` (`+38 050 123 45 67`).
    #[must_use]
    pub fn masked(&self) -> String {
        let digits: String = self.0.chars().filter(char::is_ascii_digit).collect();

        let mut out = String::with_capacity(digits.len() + 5);
        out.push('+');
        for (i, c) in digits.chars().take(12).enumerate() {
            if matches!(i, 2 | 5 | 8 | 10) {
                out.push(' ');
            }
            out.push(c);
        }
        out
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_country_code() {
        assert!(PhoneNumber::parse("+380501234567").is_ok());
        assert!(PhoneNumber::parse("380501234567").is_ok());
    }

    #[test]
    fn test_parse_masked_input() {
        let phone = PhoneNumber::parse("+38 050 123 45 67").unwrap();
        assert_eq!(phone.as_str(), "+380501234567");
    }

    #[test]
    fn test_parse_without_country_code_fails() {
        assert!(matches!(
            PhoneNumber::parse("0501234567"),
            Err(PhoneError::InvalidPrefix)
        ));
    }

    #[test]
    fn test_parse_short_fails() {
        assert!(PhoneNumber::parse("12345").is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(PhoneNumber::parse(""), Err(PhoneError::Empty)));
        assert!(matches!(PhoneNumber::parse("   "), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_parse_wrong_subscriber_length() {
        assert!(matches!(
            PhoneNumber::parse("+38050123456"),
            Err(PhoneError::InvalidSubscriber)
        ));
        assert!(matches!(
            PhoneNumber::parse("+3805012345678"),
            Err(PhoneError::InvalidSubscriber)
        ));
    }

    #[test]
    fn test_parse_non_digit_subscriber() {
        assert!(matches!(
            PhoneNumber::parse("+38050123456a"),
            Err(PhoneError::InvalidSubscriber)
        ));
    }

    #[test]
    fn test_masked() {
        let phone = PhoneNumber::parse("+380501234567").unwrap();
        assert_eq!(phone.masked(), "+38 050 123 45 67");
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = PhoneNumber::parse("+380501234567").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"+380501234567\"");

        let parsed: PhoneNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }
}
