//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// City query was empty or blank
    #[error("Invalid city query: {0}")]
    InvalidCityQuery(String),

    /// Provider identifier not recognized
    #[error("Unknown weather provider: {0}")]
    UnknownProvider(String),

    /// Temperature unit not recognized
    #[error("Unknown temperature unit: {0}. Use 'celsius' or 'fahrenheit'")]
    UnknownUnit(String),
}
