//! Keyword catalogs for the range grammar.
//!
//! Both catalogs are plain lists so they can be injected from TOML:
//!
//! ```toml
//! periods = ["daily", "weekly", "fortnightly"]
//! specials = ["first", "london", "latest"]
//! ```
//!
//! An empty `specials` list leaves the catalog open: any token that is not
//! a number or a date is taken as a special keyword.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Period names recognized after `:` when no configuration says otherwise.
pub const DEFAULT_PERIODS: &[&str] = &["hourly", "daily", "weekly", "monthly", "quarterly", "annually"];

/// Recognized keyword catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keywords {
    /// Period names accepted in the modifier position.
    #[serde(default = "default_periods")]
    pub periods: Vec<String>,

    /// Special keywords accepted in the start/end positions (empty = any).
    #[serde(default)]
    pub specials: Vec<String>,
}

fn default_periods() -> Vec<String> {
    DEFAULT_PERIODS.iter().map(|p| p.to_string()).collect()
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            periods: default_periods(),
            specials: Vec::new(),
        }
    }
}

impl Keywords {
    /// Restrict special keywords to the given catalog.
    pub fn with_specials<I, S>(mut self, specials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specials = specials.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the period catalog.
    pub fn with_periods<I, S>(mut self, periods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.periods = periods.into_iter().map(Into::into).collect();
        self
    }

    /// Load catalogs from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let keywords: Keywords = toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse keywords: {}", e)))?;
        keywords.validate()?;
        Ok(keywords)
    }

    /// Serialize catalogs back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize keywords: {}", e)))
    }

    pub fn is_period(&self, token: &str) -> bool {
        self.periods.iter().any(|p| p == token)
    }

    pub fn is_special(&self, token: &str) -> bool {
        self.specials.is_empty() || self.specials.iter().any(|s| s == token)
    }

    /// Reject catalog entries the grammar could never produce.
    fn validate(&self) -> Result<()> {
        for word in self.periods.iter().chain(self.specials.iter()) {
            if word.is_empty() {
                return Err(Error::Config("keyword must not be empty".to_string()));
            }
            if word.contains([':', '-']) {
                return Err(Error::Config(format!(
                    "keyword '{}' contains a range separator",
                    word
                )));
            }
            if word.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::Config(format!("keyword '{}' is numeric", word)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_periods() {
        let kw = Keywords::default();
        assert!(kw.is_period("weekly"));
        assert!(kw.is_period("daily"));
        assert!(!kw.is_period("biweekly"));
        assert!(!kw.is_period("Weekly"));
    }

    #[test]
    fn test_open_specials() {
        let kw = Keywords::default();
        assert!(kw.is_special("london"));
        assert!(kw.is_special("anything"));
    }

    #[test]
    fn test_restricted_specials() {
        let kw = Keywords::default().with_specials(["london", "latest"]);
        assert!(kw.is_special("london"));
        assert!(!kw.is_special("paris"));
    }

    #[test]
    fn test_from_toml_partial() {
        let kw = Keywords::from_toml_str("specials = [\"first\", \"latest\"]\n").unwrap();
        assert_eq!(kw.specials, vec!["first", "latest"]);
        assert_eq!(kw.periods, default_periods());
    }

    #[test]
    fn test_from_toml_periods() {
        let kw = Keywords::from_toml_str("periods = [\"fortnightly\"]\n").unwrap();
        assert!(kw.is_period("fortnightly"));
        assert!(!kw.is_period("weekly"));
    }

    #[test]
    fn test_from_toml_rejects_separator() {
        let err = Keywords::from_toml_str("periods = [\"bi-weekly\"]\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_toml_rejects_numeric() {
        let err = Keywords::from_toml_str("specials = [\"123\"]\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_toml_malformed() {
        assert!(Keywords::from_toml_str("periods = 3").is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let kw = Keywords::default().with_specials(["london"]);
        let text = kw.to_toml_string().unwrap();
        assert_eq!(Keywords::from_toml_str(&text).unwrap(), kw);
    }
}
