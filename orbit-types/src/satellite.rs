use crate::record::OrbitalRecord;
use derive_more::{Display, From, Into};

/// NORAD catalog number
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, From, Into)]
pub struct SatelliteId(u64);

impl SatelliteId {
    pub const fn new(norad_id: u64) -> Self {
        Self(norad_id)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Display)]
pub enum SatelliteKind {
    Iss,
    Starlink,
    Gps,
    Communication,
    #[default]
    Other,
}

impl SatelliteKind {
    pub const ALL: [SatelliteKind; 5] = [
        SatelliteKind::Iss,
        SatelliteKind::Starlink,
        SatelliteKind::Gps,
        SatelliteKind::Communication,
        SatelliteKind::Other,
    ];
}

impl From<&str> for SatelliteKind {
    fn from(value: &str) -> Self {
        use SatelliteKind::*;
        match value.trim().to_ascii_lowercase().as_str() {
            "iss" => Iss,
            "starlink" => Starlink,
            "gps" => Gps,
            "communication" => Communication,
            _ => Other,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Display)]
#[display(
    fmt = "{{id: {}, name: {}, kind: {}, record: {}}}",
    "id",
    "name",
    "kind",
    "record"
)]
pub struct TrackedObject {
    pub id: SatelliteId,
    pub name: String,
    pub kind: SatelliteKind,
    pub is_active: bool,
    pub record: OrbitalRecord,
}

impl TrackedObject {
    pub fn new(id: SatelliteId, name: impl Into<String>, record: OrbitalRecord) -> Self {
        Self {
            id,
            name: name.into(),
            kind: SatelliteKind::Other,
            is_active: true,
            record,
        }
    }

    pub fn with_kind(mut self, kind: SatelliteKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}
