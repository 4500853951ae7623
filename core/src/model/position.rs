use serde::{Deserialize, Serialize};

/// A single geodetic fix reported by the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub timestamp: f64,
}

impl GeoPosition {
    pub fn new(longitude: f64, latitude: f64, altitude: f64, timestamp: f64) -> Self {
        Self {
            longitude,
            latitude,
            altitude,
            timestamp,
        }
    }

    /// A bare location, used for radar centers.
    pub fn at(longitude: f64, latitude: f64) -> Self {
        Self::new(longitude, latitude, 0.0, 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && self.altitude.is_finite()
            && self.timestamp.is_finite()
    }
}

/// Either a unit bearing vector or a coordinate in the 100x100 radar square.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }
}
