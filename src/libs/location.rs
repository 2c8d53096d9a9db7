//! Job-site location capture.
//!
//! A [`LocationProvider`] answers "where am I?". The capture wrapper adds the
//! rules: a fixed 10 second deadline, no cached positions, and an error type
//! whose message can go straight to the user. A failed capture never touches
//! the address the user typed.

use super::job::Coordinates;
use std::time::Duration;
use thiserror::Error;

/// Deadline for acquiring a position.
pub const LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("Geolocation is not supported on this device.")]
    Unsupported,
    #[error("Timeout expired")]
    Timeout,
    #[error("User denied Geolocation")]
    PermissionDenied,
    #[error("{0}")]
    Unavailable(String),
}

impl LocationError {
    /// Text shown to the user when capture fails.
    pub fn user_message(&self) -> String {
        match self {
            LocationError::Unsupported => self.to_string(),
            _ => format!("Error getting location: {}", self),
        }
    }
}

/// Knobs passed to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached position the provider may return. Zero means always
    /// take a fresh reading.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: LOCATION_TIMEOUT,
            maximum_age: Duration::ZERO,
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait LocationProvider {
    fn is_available(&self) -> bool;

    async fn current_position(&self, options: PositionOptions) -> Result<Coordinates, LocationError>;
}

/// Captures the current position with the default options.
pub async fn capture_location<P: LocationProvider>(provider: &P) -> Result<Coordinates, LocationError> {
    capture_location_with(provider, PositionOptions::default()).await
}

/// Captures the current position, enforcing `options.timeout`.
pub async fn capture_location_with<P: LocationProvider>(provider: &P, options: PositionOptions) -> Result<Coordinates, LocationError> {
    if !provider.is_available() {
        return Err(LocationError::Unsupported);
    }

    match tokio::time::timeout(options.timeout, provider.current_position(options)).await {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout),
    }
}

/// Address text used when the position is captured, e.g. `"GPS: 51.50735, -0.12776"`.
pub fn gps_address(coordinates: &Coordinates) -> String {
    format!("GPS: {:.5}, {:.5}", coordinates.latitude, coordinates.longitude)
}

/// Provider that reports coordinates given up front, e.g. on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation {
    coordinates: Option<Coordinates>,
}

impl FixedLocation {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }

    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Self::new(Some(Coordinates { latitude, longitude })),
            _ => Self::default(),
        }
    }
}

impl LocationProvider for FixedLocation {
    fn is_available(&self) -> bool {
        self.coordinates.is_some()
    }

    async fn current_position(&self, _options: PositionOptions) -> Result<Coordinates, LocationError> {
        let coordinates = self.coordinates.ok_or_else(|| LocationError::Unavailable("Position unavailable".to_string()))?;
        if !(-90.0..=90.0).contains(&coordinates.latitude) || !(-180.0..=180.0).contains(&coordinates.longitude) {
            return Err(LocationError::Unavailable("Position out of range".to_string()));
        }
        Ok(coordinates)
    }
}
