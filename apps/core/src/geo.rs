//! Coordinates, provenance tags, and bounding regions.

use std::fmt;

use serde::Serialize;

use crate::error::CoordinateError;

/// A validated latitude/longitude pair in degrees.
///
/// Fields are private so every instance has passed [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Fallback point used when the device cannot report a position.
    pub const NEW_YORK: Self = Self {
        latitude: 40.7128,
        longitude: -74.0060,
    };

    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if valid {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(CoordinateError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    pub const fn longitude(self) -> f64 {
        self.longitude
    }

    /// Text shown next to "Current location", four decimals per axis.
    pub fn display_text(self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Where the current location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    DeviceGeolocation,
    ManualPin,
    DefaultFallback,
}

impl Provenance {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeviceGeolocation => "device-geolocation",
            Self::ManualPin => "manual-pin",
            Self::DefaultFallback => "default-fallback",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DeviceGeolocation => "Device",
            Self::ManualPin => "Manual pin",
            Self::DefaultFallback => "Default",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub const fn from_point(point: Coordinate) -> Self {
        Self {
            south: point.latitude,
            west: point.longitude,
            north: point.latitude,
            east: point.longitude,
        }
    }

    /// Smallest rectangle containing every point, or `None` for no points.
    pub fn around<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self::from_point(first);
        for point in points {
            bounds.extend(point);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, point: Coordinate) {
        self.south = self.south.min(point.latitude);
        self.north = self.north.max(point.latitude);
        self.west = self.west.min(point.longitude);
        self.east = self.east.max(point.longitude);
    }

    pub fn union(mut self, other: Self) -> Self {
        self.south = self.south.min(other.south);
        self.north = self.north.max(other.north);
        self.west = self.west.min(other.west);
        self.east = self.east.max(other.east);
        self
    }

    /// Grow each side by `ratio` of the matching span.
    ///
    /// A ratio of `0.1` widens a 1° tall box to 1.2°, clamped to the globe.
    pub fn pad(self, ratio: f64) -> Self {
        let lat_buffer = self.height() * ratio;
        let lng_buffer = self.width() * ratio;
        Self {
            south: (self.south - lat_buffer).max(-90.0),
            west: (self.west - lng_buffer).max(-180.0),
            north: (self.north + lat_buffer).min(90.0),
            east: (self.east + lng_buffer).min(180.0),
        }
    }

    pub fn height(self) -> f64 {
        self.north - self.south
    }

    pub fn width(self) -> f64 {
        self.east - self.west
    }

    /// Midpoint as `(latitude, longitude)`.
    pub fn center(self) -> (f64, f64) {
        (
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    pub fn contains(self, point: Coordinate) -> bool {
        (self.south..=self.north).contains(&point.latitude)
            && (self.west..=self.east).contains(&point.longitude)
    }
}
