//! Device position capability.

use std::time::Duration;

use async_trait::async_trait;
use mandi_core::{Coordinate, DEFAULT_CENTER};
use thiserror::Error;

pub const DEFAULT_GEOLOCATION_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("geolocation is not available on this device")]
    Unavailable,

    #[error("geolocation permission denied")]
    PermissionDenied,

    #[error("geolocation timed out")]
    Timeout,
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

/// A device without positioning.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl Geolocator for NoGeolocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        Err(GeolocationError::Unavailable)
    }
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinate);

#[async_trait]
impl Geolocator for FixedPosition {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        Ok(self.0)
    }
}

/// Best-effort position read bounded by `timeout`.
///
/// Any failure, a timeout, or a non-finite fix yields [`DEFAULT_CENTER`].
pub async fn locate_or_default(geolocator: &dyn Geolocator, timeout: Duration) -> Coordinate {
    let error = match tokio::time::timeout(timeout, geolocator.current_position()).await {
        Ok(Ok(position)) if position.is_finite() => return position,
        Ok(Ok(_)) => GeolocationError::Unavailable,
        Ok(Err(e)) => e,
        Err(_) => GeolocationError::Timeout,
    };
    tracing::warn!(error = %error, "geolocation failed, using default centre");
    DEFAULT_CENTER
}
