//! City query value object

use serde::Serialize;

use crate::errors::DomainError;

/// A validated city name query
///
/// Free-form text passed through to the provider as-is; the only rule is
/// that it must not be empty or blank. Surrounding whitespace is trimmed on
/// construction. The provider decides what the string resolves to, and the
/// city name it returns (with its own casing) is what ends up in results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CityQuery(String);

impl CityQuery {
    /// Create a validated city query
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCityQuery` if the input is empty or
    /// consists only of whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidCityQuery(
                "city name must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The query text as entered (trimmed)
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for cache keys
    #[must_use]
    pub fn cache_form(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for CityQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CityQuery {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
