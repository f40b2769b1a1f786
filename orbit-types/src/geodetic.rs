use crate::time::UtcTimestamp;
use derive_more::Display;

/// A reported sub-satellite point.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Display)]
#[display(
    fmt = "{{lat: {}, lon: {}, alt_km: {}, t: {}}}",
    "latitude",
    "longitude",
    "altitude_km",
    "timestamp"
)]
pub struct GeodeticSample {
    /// Latitude [deg], -90..=90
    pub latitude: f64,
    /// Longitude [deg], -180..=180
    pub longitude: f64,
    /// Height above the reference surface [km]
    pub altitude_km: f64,
    pub timestamp: UtcTimestamp,
}

impl GeodeticSample {
    pub fn new(latitude: f64, longitude: f64, altitude_km: f64, timestamp: UtcTimestamp) -> Self {
        Self {
            latitude,
            longitude,
            altitude_km,
            timestamp,
        }
    }

    /// Returns whichever of the two samples was observed last, preferring `self` on a tie
    pub fn latest<'a>(&'a self, other: &'a GeodeticSample) -> &'a GeodeticSample {
        if other.timestamp > self.timestamp {
            other
        } else {
            self
        }
    }
}
