use crate::{elements::OrbitalElements, geodetic::GeodeticSample, time::UtcTimestamp};
use derive_more::Display;

/// What is known about an object's whereabouts.
///
/// Elements are propagated to any instant, a sample only places the object where it was seen.
#[derive(Copy, Clone, PartialEq, Debug, Display)]
pub enum OrbitalRecord {
    Elements(OrbitalElements),
    Sample(GeodeticSample),
}

impl OrbitalRecord {
    pub fn elements(&self) -> Option<&OrbitalElements> {
        match self {
            OrbitalRecord::Elements(e) => Some(e),
            OrbitalRecord::Sample(_) => None,
        }
    }

    pub fn sample(&self) -> Option<&GeodeticSample> {
        match self {
            OrbitalRecord::Elements(_) => None,
            OrbitalRecord::Sample(s) => Some(s),
        }
    }

    /// Epoch of the elements or observation time of the sample
    pub fn reference_time(&self) -> UtcTimestamp {
        match self {
            OrbitalRecord::Elements(e) => e.epoch,
            OrbitalRecord::Sample(s) => s.timestamp,
        }
    }
}

impl From<OrbitalElements> for OrbitalRecord {
    fn from(value: OrbitalElements) -> Self {
        OrbitalRecord::Elements(value)
    }
}

impl From<GeodeticSample> for OrbitalRecord {
    fn from(value: GeodeticSample) -> Self {
        OrbitalRecord::Sample(value)
    }
}
