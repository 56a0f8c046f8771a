use serde::{Deserialize, Serialize};

/// Earth's radius in miles
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Distance reported when either endpoint has no coordinates
pub const UNKNOWN_DISTANCE_MILES: f64 = 999.0;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Build a point from nullable columns.
    ///
    /// A missing coordinate, or one stored as exactly `0.0`, means the location is unknown.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) if lat != 0.0 && lon != 0.0 => Some(Self::new(lat, lon)),
            _ => None,
        }
    }
}

/// Distance between two optional locations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    Known(f64),
    Unknown,
}

impl Distance {
    pub fn known(self) -> Option<f64> {
        match self {
            Distance::Known(miles) => Some(miles),
            Distance::Unknown => None,
        }
    }

    /// Unknown distances collapse to [`UNKNOWN_DISTANCE_MILES`]
    pub fn miles_or_sentinel(self) -> f64 {
        self.known().unwrap_or(UNKNOWN_DISTANCE_MILES)
    }

    /// Unknown distances never satisfy a radius
    #[inline]
    pub fn is_within(self, max_miles: f64) -> bool {
        matches!(self, Distance::Known(miles) if miles <= max_miles)
    }
}

/// Calculate the Haversine distance between two points in miles
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
#[inline]
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Distance between two locations, `Unknown` if either is missing
pub fn distance_between(from: Option<GeoPoint>, to: Option<GeoPoint>) -> Distance {
    match (from, to) {
        (Some(a), Some(b)) => {
            Distance::Known(haversine_miles(a.latitude, a.longitude, b.latitude, b.longitude))
        }
        _ => Distance::Unknown,
    }
}

/// Raw-coordinate form of [`distance_between`] returning the 999.0 sentinel for missing data
pub fn distance_miles(
    lat1: Option<f64>,
    lon1: Option<f64>,
    lat2: Option<f64>,
    lon2: Option<f64>,
) -> f64 {
    distance_between(GeoPoint::from_parts(lat1, lon1), GeoPoint::from_parts(lat2, lon2))
        .miles_or_sentinel()
}

/// Round to one decimal place
#[inline]
pub fn round_to_tenth(miles: f64) -> f64 {
    (miles * 10.0).round() / 10.0
}
