//! Messages pushed over the live position feed, one JSON object per message

use orbit_types::prelude::*;
use serde::Deserialize;
use tracing::debug;

pub const POSITION_MSG: &str = "satellite_position";
pub const STATUS_MSG: &str = "satellite_status";
pub const HEARTBEAT_MSG: &str = "heartbeat";

#[derive(Clone, PartialEq, Debug)]
pub enum LiveMessage {
    Position(LivePosition),
    Status(LiveStatus),
    Heartbeat,
    Unsupported(String),
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct LivePosition {
    pub satellite_id: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
    pub timestamp: UtcTimestamp,
}

impl LivePosition {
    pub fn satellite_id(&self) -> SatelliteId {
        SatelliteId::from(self.satellite_id)
    }

    pub fn sample(&self) -> GeodeticSample {
        GeodeticSample::new(self.latitude, self.longitude, self.altitude_km, self.timestamp)
    }
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct LiveStatus {
    pub satellite_id: u64,
    pub is_active: bool,
    #[serde(default)]
    pub timestamp: Option<UtcTimestamp>,
}

impl LiveStatus {
    pub fn satellite_id(&self) -> SatelliteId {
        SatelliteId::from(self.satellite_id)
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

pub fn parse_live_message(msg: &str) -> Result<LiveMessage, serde_json::Error> {
    let envelope: Envelope = serde_json::from_str(msg)?;
    Ok(match envelope.kind.as_str() {
        POSITION_MSG => LiveMessage::Position(serde_json::from_value(envelope.data)?),
        STATUS_MSG => LiveMessage::Status(serde_json::from_value(envelope.data)?),
        HEARTBEAT_MSG => LiveMessage::Heartbeat,
        other => {
            debug!(kind = other, "Unsupported live message");
            LiveMessage::Unsupported(other.to_owned())
        }
    })
}
