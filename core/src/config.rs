//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use crate::models::Coordinates;
use std::env;
use std::time::Duration;

/// Collection endpoint used when `AGENT_API_URL` is not set
pub const DEFAULT_API_URL: &str = "https://valorant-api.com/v1/agents";

/// Request timeout used when `AGENT_API_TIMEOUT_SECS` is not set or invalid
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    /// Remote agent API settings
    pub api: ApiConfig,
    /// Device location settings
    pub location: LocationConfig,
}

/// Remote agent API configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the collection endpoint (no trailing slash)
    pub base_url: String,
    /// Per-request timeout (in seconds)
    pub timeout_secs: u64,
}

/// Location configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationConfig {
    /// Fixed device coordinates; `None` means location access is denied
    pub coordinates: Option<Coordinates>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let latitude = env::var("DEVICE_LATITUDE")
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok());
        let longitude = env::var("DEVICE_LONGITUDE")
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok());

        Self {
            api: ApiConfig {
                base_url: env::var("AGENT_API_URL")
                    .ok()
                    .map(|url| url.trim_end_matches('/').to_string())
                    .filter(|url| !url.is_empty())
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                timeout_secs: env::var("AGENT_API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .filter(|t| *t > 0)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
            location: LocationConfig {
                coordinates: match (latitude, longitude) {
                    (Some(latitude), Some(longitude)) => Some(Coordinates {
                        latitude,
                        longitude,
                    }),
                    _ => None,
                },
            },
        }
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Build the shared HTTP client (connection pooling, configured timeout)
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder().timeout(self.timeout()).build()
    }
}
