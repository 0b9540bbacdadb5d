// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use crate::errors::PlacesError;
use dotenv::dotenv;
use std::env;
use std::time::Duration;

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
pub const DEFAULT_DISTANCE_MATRIX_URL: &str =
    "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Google Places API Key
    pub google_places_api_key: String,

    /// Base URL for place details and autocomplete
    pub places_base_url: String,

    /// Distance Matrix endpoint
    pub distance_matrix_url: String,

    /// Outbound requests allowed per second towards the provider
    pub api_requests_per_second: u32,

    /// Per-request timeout in seconds
    pub api_request_timeout: u64,

    /// Interval between expired cache entry sweeps, in seconds
    pub cache_cleanup_interval: u64,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_or = |key: &str, default: u64| -> u64 {
            lookup(key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        };

        Config {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),

            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),

            google_places_api_key: lookup("GOOGLE_PLACES_API_KEY").unwrap_or_default(),

            places_base_url: lookup("PLACES_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string()),

            distance_matrix_url: lookup("DISTANCE_MATRIX_URL")
                .unwrap_or_else(|| DEFAULT_DISTANCE_MATRIX_URL.to_string()),

            api_requests_per_second: lookup("API_REQUESTS_PER_SECOND")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),

            api_request_timeout: parse_or("API_REQUEST_TIMEOUT", 10),

            cache_cleanup_interval: parse_or("CACHE_CLEANUP_INTERVAL", 300),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api_request_timeout)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cache_cleanup_interval)
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures the lookup service can be wired safely
    pub fn validate(&self) -> Result<(), PlacesError> {
        if self.places_base_url.is_empty() || self.distance_matrix_url.is_empty() {
            return Err(PlacesError::ConfigError(
                "PLACES_BASE_URL and DISTANCE_MATRIX_URL must not be empty".to_string(),
            ));
        }

        if self.api_requests_per_second == 0 {
            return Err(PlacesError::ConfigError(
                "API_REQUESTS_PER_SECOND must be greater than zero".to_string(),
            ));
        }

        if self.api_request_timeout == 0 || self.cache_cleanup_interval == 0 {
            return Err(PlacesError::ConfigError(
                "API_REQUEST_TIMEOUT and CACHE_CLEANUP_INTERVAL must be greater than zero"
                    .to_string(),
            ));
        }

        if self.google_places_api_key.is_empty() {
            log::warn!("GOOGLE_PLACES_API_KEY not configured - remote lookups will fail");
        }

        Ok(())
    }
}
