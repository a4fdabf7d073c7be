//! Application-level errors

use domain::ProviderId;
use thiserror::Error;

/// Errors surfaced by the weather service and its provider adapters
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeatherError {
    /// Requested provider has no credential and was never registered.
    /// Fatal for the call; the cache cannot remedy a configuration problem.
    #[error("Weather provider \"{0}\" is not configured")]
    ProviderNotConfigured(ProviderId),

    /// Provider responded with a failure status. Carries the upstream's own
    /// message when one could be parsed; displayed verbatim so the caller
    /// sees it unchanged.
    #[error("{0}")]
    Upstream(String),

    /// Network-level failure: no response received at all
    #[error("Connection failed: {0}")]
    Transport(String),

    /// Provider responded successfully but the body could not be decoded
    #[error("Unreadable response from weather provider: {0}")]
    Parse(String),
}

impl WeatherError {
    /// Whether a stale cache entry may stand in for this failure
    ///
    /// Configuration problems are not recoverable; anything that went wrong
    /// past the registry is.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::ProviderNotConfigured(_))
    }
}
