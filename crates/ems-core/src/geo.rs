//! Geographic coordinate type and distance primitive.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Location sets are snapped with
//! nearest-neighbour queries whose ties are broken by index, so the extra
//! precision keeps equidistant points genuinely equal instead of rounding
//! them apart.

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        const R: f64 = 6_371_008.8; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }

    /// Haversine distance in kilometres.
    #[inline]
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        self.distance_m(other) / 1_000.0
    }

    /// `[lat, lon]` array form used as an R-tree key.
    #[inline]
    pub fn as_array(self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
