use serde::Serialize;
use std::fmt;

/// Geographic position captured by the scanning device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
    pub const LON_RANGE: (f64, f64) = (-180.0, 180.0);

    /// Build a point, returning `None` when a coordinate is not finite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if Self::lat_in_range(latitude) && Self::lon_in_range(longitude) {
            Some(Self {
                latitude,
                longitude,
            })
        } else {
            None
        }
    }

    pub fn lat_in_range(v: f64) -> bool {
        v.is_finite() && (Self::LAT_RANGE.0..=Self::LAT_RANGE.1).contains(&v)
    }

    pub fn lon_in_range(v: f64) -> bool {
        v.is_finite() && (Self::LON_RANGE.0..=Self::LON_RANGE.1).contains(&v)
    }

    /// Convert DB columns → point. Both columns are NULL when no fix was available.
    pub fn from_db(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        match (lat, lon) {
            (Some(la), Some(lo)) => Self::new(la, lo),
            _ => None,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}
