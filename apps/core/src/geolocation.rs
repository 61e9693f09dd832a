//! What a device fix looks like and what to tell the user when there is none.

use crate::error::{CoordinateError, GeolocationError};
use crate::geo::Coordinate;

pub const ACCESS_DENIED: &str = "Location access denied. Click on map to set location.";
pub const NOT_SUPPORTED: &str = "Geolocation not supported. Click on map to set location.";

/// Raw position reported by a geolocation provider, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeolocationFix {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeolocationFix {
    pub fn coordinate(self) -> Result<Coordinate, CoordinateError> {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Warning shown when startup acquisition falls back to the default point.
pub const fn fallback_message(error: GeolocationError) -> &'static str {
    match error {
        GeolocationError::Unsupported => NOT_SUPPORTED,
        GeolocationError::PermissionDenied
        | GeolocationError::PositionUnavailable
        | GeolocationError::Timeout => ACCESS_DENIED,
    }
}

/// Map a W3C `GeolocationPositionError.code` onto the error taxonomy.
pub const fn from_position_error_code(code: u16) -> GeolocationError {
    match code {
        1 => GeolocationError::PermissionDenied,
        3 => GeolocationError::Timeout,
        _ => GeolocationError::PositionUnavailable,
    }
}
