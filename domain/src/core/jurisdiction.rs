//! Jurisdiction value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Jurisdiction used when the caller supplies none.
pub const DEFAULT_JURISDICTION: &str = "US";

/// A country/region tag (Value Object)
///
/// Tags are trimmed and upper-cased on construction so `"sg"` and `" SG "`
/// select the same trusted-domain list. `GB` is accepted as an alias of `UK`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Jurisdiction {
    code: String,
}

impl Jurisdiction {
    /// Parse a jurisdiction tag.
    ///
    /// Accepts 2-8 ASCII letters, digits, `-` or `_` after trimming.
    pub fn new(tag: impl AsRef<str>) -> Result<Self, DomainError> {
        let code = tag.as_ref().trim().to_ascii_uppercase();
        let valid = (2..=8).contains(&code.len())
            && code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(DomainError::InvalidJurisdiction(tag.as_ref().to_string()));
        }

        let code = match code.as_str() {
            "GB" => "UK".to_string(),
            _ => code,
        };
        Ok(Self { code })
    }

    /// Parse a tag, falling back to `default` when it is empty or malformed.
    pub fn parse_or(tag: &str, default: &Jurisdiction) -> Self {
        Self::new(tag).unwrap_or_else(|_| default.clone())
    }

    /// The normalized code (e.g. `"SG"`)
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl Default for Jurisdiction {
    fn default() -> Self {
        Self {
            code: DEFAULT_JURISDICTION.to_string(),
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl std::str::FromStr for Jurisdiction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Jurisdiction {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Jurisdiction> for String {
    fn from(j: Jurisdiction) -> Self {
        j.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let j = Jurisdiction::new(" sg ").unwrap();
        assert_eq!(j.code(), "SG");
    }

    #[test]
    fn test_gb_alias() {
        assert_eq!(Jurisdiction::new("gb").unwrap().code(), "UK");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Jurisdiction::new("").is_err());
        assert!(Jurisdiction::new("U").is_err());
        assert!(Jurisdiction::new("U$").is_err());
    }

    #[test]
    fn test_parse_or_fallback() {
        let sg = Jurisdiction::new("SG").unwrap();
        assert_eq!(Jurisdiction::parse_or("", &sg).code(), "SG");
        assert_eq!(Jurisdiction::parse_or("  ", &Jurisdiction::default()).code(), "US");
        assert_eq!(Jurisdiction::parse_or("jp", &sg).code(), "JP");
    }

    #[test]
    fn test_serde_as_string() {
        let j: Jurisdiction = serde_json::from_str("\"au\"").unwrap();
        assert_eq!(j.code(), "AU");
        assert_eq!(serde_json::to_string(&j).unwrap(), "\"AU\"");
    }
}
