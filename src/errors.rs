// src/errors.rs
// DOCUMENTATION: Custom error types for places lookups
// PURPOSE: Centralized error handling for the provider client, cache and config

use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Errors raised by collaborators (remote provider, configuration).
/// The lookup service itself never surfaces these to its callers; it logs them
/// and substitutes an empty value instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacesError {
    #[error("Place not found with id: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for PlacesError {
    fn from(err: serde_json::Error) -> Self {
        PlacesError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PlacesError::NotFound("abc".to_string()).to_string(),
            "Place not found with id: abc"
        );
        assert_eq!(PlacesError::RateLimitExceeded.to_string(), "Rate limit exceeded");
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let places_err: PlacesError = err.into();
        assert!(matches!(places_err, PlacesError::SerializationError(_)));
    }
}
