//! Error types for the agent browser
//!
//! Every fallible operation in the library returns `BrowserError`. None of the
//! variants is fatal; the view-model turns them into loading/empty/error state.

use thiserror::Error;

/// Errors surfaced by the repository and the location provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrowserError {
    /// Transport failure or a non-2xx HTTP response
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not match the expected schema
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// No agent exists with the requested identifier
    #[error("Agent not found: {0}")]
    NotFound(String),

    /// The user refused location access
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Permission was granted but no position could be read
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),
}

impl From<reqwest::Error> for BrowserError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BrowserError::Decode(err.to_string())
        } else {
            BrowserError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for BrowserError {
    fn from(err: serde_json::Error) -> Self {
        BrowserError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BrowserError::NotFound("abc".to_string());
        assert_eq!(err.to_string(), "Agent not found: abc");

        let err = BrowserError::Network("HTTP 500".to_string());
        assert_eq!(err.to_string(), "Network error: HTTP 500");
    }

    #[test]
    fn test_from_serde_error_is_decode() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("not json");
        let err: BrowserError = parse.unwrap_err().into();
        assert!(matches!(err, BrowserError::Decode(_)));
    }
}
