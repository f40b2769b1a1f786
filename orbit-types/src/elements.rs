use crate::time::UtcTimestamp;
use std::fmt;

/// Classical orbital elements, as reported by the catalog API or decoded from a TLE.
///
/// Angles are kept in degrees exactly as provided.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct OrbitalElements {
    /// Mean motion [rev/day]
    pub mean_motion: f64,

    /// Eccentricity, absent means circular
    pub eccentricity: Option<f64>,

    /// Inclination [deg]
    pub inclination: f64,

    /// Right ascension of the ascending node [deg]
    pub raan: f64,

    /// Argument of perigee [deg]
    pub arg_perigee: f64,

    /// Mean anomaly at epoch [deg]
    pub mean_anomaly: f64,

    /// Instant the elements are valid at
    pub epoch: UtcTimestamp,
}

impl OrbitalElements {
    pub fn eccentricity_or_circular(&self) -> f64 {
        self.eccentricity.unwrap_or(0.0)
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{n: {}, e: {}, i: {}, raan: {}, argp: {}, M: {}, epoch: {}}}",
            self.mean_motion,
            self.eccentricity_or_circular(),
            self.inclination,
            self.raan,
            self.arg_perigee,
            self.mean_anomaly,
            self.epoch
        )
    }
}
