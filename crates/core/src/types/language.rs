//! Interface language selection.

use serde::{Deserialize, Serialize};

/// Languages the storefront speaks. Ukrainian is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ua,
    Ru,
}

impl Language {
    /// The persisted two-letter code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ua => "ua",
            Self::Ru => "ru",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ua" => Ok(Self::Ua),
            "ru" => Ok(Self::Ru),
            _ => Err(format!("invalid language: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ukrainian() {
        assert_eq!(Language::default(), Language::Ua);
    }

    #[test]
    fn test_wire_form() {
        assert_eq!(serde_json::to_string(&Language::Ua).unwrap(), "\"ua\"");
        let parsed: Language = serde_json::from_str("\"ru\"").unwrap();
        assert_eq!(parsed, Language::Ru);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("en".parse::<Language>().is_err());
    }
}
