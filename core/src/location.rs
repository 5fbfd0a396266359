//! Device location capability and the built-in providers
//!
//! The view-model asks for permission first and only reads a position once
//! access is granted. Desktop builds have no platform location service, so the
//! shipped provider serves coordinates from configuration.

use crate::config::LocationConfig;
use crate::error::BrowserError;
use crate::models::Coordinates;
use async_trait::async_trait;

/// Outcome of a permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// Location may be read
    Granted,
    /// The user (or configuration) refused access
    Denied,
}

/// Device location capability
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Ask for foreground location access
    async fn request_permission(&self) -> PermissionStatus;

    /// Read the current position
    ///
    /// # Errors
    /// * `BrowserError::LocationUnavailable` if no position can be read
    async fn current_position(&self) -> Result<Coordinates, BrowserError>;
}

/// Request permission, then read the position
///
/// Denial becomes `BrowserError::PermissionDenied` and the position is never
/// read.
pub async fn acquire(provider: &dyn LocationProvider) -> Result<Coordinates, BrowserError> {
    match provider.request_permission().await {
        PermissionStatus::Granted => provider.current_position().await,
        PermissionStatus::Denied => Err(BrowserError::PermissionDenied(
            "Location permission was not granted".to_string(),
        )),
    }
}

/// Provider with a fixed position; denies access when it has none
#[derive(Debug, Clone, Default)]
pub struct StaticLocationProvider {
    coordinates: Option<Coordinates>,
}

impl StaticLocationProvider {
    /// Provider that always reports `coordinates`
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates: Some(coordinates),
        }
    }

    /// Provider that always denies access
    pub fn denied() -> Self {
        Self { coordinates: None }
    }

    /// Provider built from the location section of the configuration
    pub fn from_config(config: &LocationConfig) -> Self {
        Self {
            coordinates: config.coordinates,
        }
    }
}

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn request_permission(&self) -> PermissionStatus {
        if self.coordinates.is_some() {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    async fn current_position(&self) -> Result<Coordinates, BrowserError> {
        self.coordinates.ok_or_else(|| {
            BrowserError::LocationUnavailable("No device coordinates configured".to_string())
        })
    }
}
