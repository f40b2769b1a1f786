//! Documents returned by the satellite catalog REST API

use crate::parser::{parse_tle_elements, TleError};
use orbit_types::prelude::*;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Catalog record #{index} is malformed")]
    Malformed {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Catalog record '{0}' has neither 'norad_id' nor 'id'")]
    MissingId(String),
    #[error("Satellite {0} has no orbital elements, TLE or reported position")]
    MissingOrbitalData(SatelliteId),
    #[error("Satellite {id} has an invalid TLE")]
    Tle {
        id: SatelliteId,
        #[source]
        source: TleError,
    },
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// A `/satellites/` record. Every orbital field is optional, which ones are
/// present decides how the object gets placed.
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiSatellite {
    pub id: Option<u64>,
    pub norad_id: Option<u64>,
    pub name: String,
    pub is_active: Option<bool>,
    pub satellite_type: Option<String>,

    pub epoch: Option<UtcTimestamp>,
    #[serde(alias = "mean_motion_revs_per_day")]
    pub mean_motion: Option<f64>,
    pub eccentricity: Option<f64>,
    #[serde(alias = "inclination_degrees")]
    pub inclination: Option<f64>,
    pub raan: Option<f64>,
    pub arg_perigee: Option<f64>,
    pub mean_anomaly: Option<f64>,

    pub line1: Option<String>,
    pub line2: Option<String>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude_km: Option<f64>,
    pub timestamp: Option<UtcTimestamp>,
}

impl ApiSatellite {
    pub fn satellite_id(&self) -> Option<SatelliteId> {
        self.norad_id.or(self.id).map(SatelliteId::from)
    }

    /// Resolve the record into a tracked object.
    ///
    /// Precedence: explicit elements, then the TLE lines, then a reported position.
    /// `fallback_epoch` stands in for a missing element epoch or sample timestamp.
    pub fn into_tracked(self, fallback_epoch: UtcTimestamp) -> Result<TrackedObject, RecordError> {
        let id = self
            .satellite_id()
            .ok_or_else(|| RecordError::MissingId(self.name.clone()))?;
        let record = self.record(id, fallback_epoch)?;
        let kind = self
            .satellite_type
            .as_deref()
            .map(SatelliteKind::from)
            .unwrap_or_default();
        Ok(TrackedObject::new(id, self.name.trim(), record)
            .with_kind(kind)
            .with_active(self.is_active.unwrap_or(true)))
    }

    fn record(
        &self,
        id: SatelliteId,
        fallback_epoch: UtcTimestamp,
    ) -> Result<OrbitalRecord, RecordError> {
        if let (
            Some(mean_motion),
            Some(inclination),
            Some(raan),
            Some(arg_perigee),
            Some(mean_anomaly),
        ) = (
            self.mean_motion,
            self.inclination,
            self.raan,
            self.arg_perigee,
            self.mean_anomaly,
        ) {
            return Ok(OrbitalElements {
                mean_motion,
                eccentricity: self.eccentricity,
                inclination,
                raan,
                arg_perigee,
                mean_anomaly,
                epoch: self.epoch.unwrap_or(fallback_epoch),
            }
            .into());
        }

        if let (Some(line1), Some(line2)) = (self.line1.as_ref(), self.line2.as_ref()) {
            let tle = UnstructuredTle {
                satellite_name: self.name.clone(),
                line1: line1.clone(),
                line2: line2.clone(),
            };
            let elements =
                parse_tle_elements(&tle).map_err(|source| RecordError::Tle { id, source })?;
            return Ok(elements.into());
        }

        if let (Some(latitude), Some(longitude), Some(altitude_km)) =
            (self.latitude, self.longitude, self.altitude_km)
        {
            return Ok(GeodeticSample::new(
                latitude,
                longitude,
                altitude_km,
                self.timestamp.unwrap_or(fallback_epoch),
            )
            .into());
        }

        Err(RecordError::MissingOrbitalData(id))
    }
}

/// A `/positions/` record
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct ApiPosition {
    #[serde(default)]
    pub id: Option<u64>,
    pub satellite: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
    #[serde(default)]
    pub velocity_kmh: Option<f64>,
    #[serde(default)]
    pub azimuth_degrees: Option<f64>,
    #[serde(default)]
    pub elevation_degrees: Option<f64>,
    #[serde(default)]
    pub range_km: Option<f64>,
    pub timestamp: UtcTimestamp,
}

impl ApiPosition {
    pub fn satellite_id(&self) -> SatelliteId {
        SatelliteId::from(self.satellite)
    }

    pub fn sample(&self) -> GeodeticSample {
        GeodeticSample::new(self.latitude, self.longitude, self.altitude_km, self.timestamp)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document<T> {
    Page(Paginated<T>),
    List(Vec<T>),
}

impl<T> Document<T> {
    fn into_results(self) -> Vec<T> {
        match self {
            Document::Page(p) => p.results,
            Document::List(l) => l,
        }
    }
}

/// Decode a satellite catalog document, either paginated or a bare array.
///
/// Each record is decoded on its own; the outer error only covers a document
/// that is not a list of JSON values at all.
pub fn parse_catalog(
    doc: &str,
    fallback_epoch: UtcTimestamp,
) -> Result<Vec<Result<TrackedObject, RecordError>>, serde_json::Error> {
    let values = serde_json::from_str::<Document<serde_json::Value>>(doc)?.into_results();
    debug!(records = values.len(), "Decoding satellite catalog");
    Ok(values
        .into_iter()
        .enumerate()
        .map(|(index, v)| {
            serde_json::from_value::<ApiSatellite>(v)
                .map_err(|source| RecordError::Malformed { index, source })
                .and_then(|sat| sat.into_tracked(fallback_epoch))
        })
        .collect())
}

/// Decode a positions document, either paginated or a bare array
pub fn parse_positions(doc: &str) -> Result<Vec<ApiPosition>, serde_json::Error> {
    Ok(serde_json::from_str::<Document<ApiPosition>>(doc)?.into_results())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use indoc::indoc;

    fn t0() -> UtcTimestamp {
        "2026-01-01T00:00:00Z".parse().unwrap()
    }

    const CATALOG: &str = indoc! {r#"
        {
            "count": 5,
            "next": null,
            "previous": null,
            "results": [
                {
                    "id": 1, "norad_id": 25544, "name": "ISS (ZARYA)", "is_active": true,
                    "satellite_type": "ISS", "epoch": "2026-01-01T00:00:00Z",
                    "mean_motion": 15.5, "eccentricity": 0.0001, "inclination": 51.6,
                    "raan": 45.0, "arg_perigee": 0.0, "mean_anomaly": 180.0
                },
                {
                    "id": 2, "norad_id": 25545, "name": "TLE ONLY",
                    "line1": "1 25545U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
                    "line2": "2 25545  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537"
                },
                {
                    "id": 3, "name": "SAMPLE ONLY", "is_active": false,
                    "latitude": 10.0, "longitude": -20.0, "altitude_km": 550.0,
                    "timestamp": "2026-01-01T00:01:00Z"
                },
                { "id": 4, "name": "NOTHING" },
                { "id": "five", "name": "BROKEN" }
            ]
        }
    "#};

    #[test]
    fn catalog_records_resolve_independently() {
        let recs = parse_catalog(CATALOG, t0()).unwrap();
        assert_eq!(recs.len(), 5);

        let iss = recs[0].as_ref().unwrap();
        assert_eq!(iss.id, SatelliteId::new(25544));
        assert_eq!(iss.kind, SatelliteKind::Iss);
        let el = iss.record.elements().unwrap();
        assert_relative_eq!(el.mean_motion, 15.5);
        // A zero angle is present, not missing
        assert_relative_eq!(el.arg_perigee, 0.0);

        let tle = recs[1].as_ref().unwrap();
        assert_eq!(tle.kind, SatelliteKind::Other);
        assert_relative_eq!(tle.record.elements().unwrap().inclination, 51.6416);

        let sample = recs[2].as_ref().unwrap();
        assert_eq!(sample.id, SatelliteId::new(3));
        assert!(!sample.is_active);
        let s = sample.record.sample().unwrap();
        assert_relative_eq!(s.altitude_km, 550.0);
        assert_eq!(s.timestamp, "2026-01-01T00:01:00Z".parse::<UtcTimestamp>().unwrap());

        assert!(matches!(
            recs[3],
            Err(RecordError::MissingOrbitalData(id)) if id == SatelliteId::new(4)
        ));
        assert!(matches!(recs[4], Err(RecordError::Malformed { index: 4, .. })));
    }

    #[test]
    fn bare_array_and_fallback_epoch() {
        let doc = r#"[{"norad_id": 7, "name": "X", "mean_motion": 1.0, "inclination": 0.0,
            "raan": 0.0, "arg_perigee": 0.0, "mean_anomaly": 0.0}]"#;
        let recs = parse_catalog(doc, t0()).unwrap();
        let obj = recs.into_iter().next().unwrap().unwrap();
        let el = obj.record.elements().unwrap();
        assert_eq!(el.epoch, t0());
        assert_eq!(el.eccentricity, None);
    }

    #[test]
    fn missing_id() {
        let doc = r#"[{"name": "ANON", "latitude": 0.0, "longitude": 0.0, "altitude_km": 1.0}]"#;
        let recs = parse_catalog(doc, t0()).unwrap();
        assert!(matches!(&recs[0], Err(RecordError::MissingId(n)) if n == "ANON"));
    }

    #[test]
    fn invalid_tle_is_reported() {
        let doc = r#"[{"norad_id": 9, "name": "BAD", "line1": "1 00009U", "line2": "2 00009"}]"#;
        let recs = parse_catalog(doc, t0()).unwrap();
        assert!(matches!(
            &recs[0],
            Err(RecordError::Tle { source: TleError::LineTooShort { line: 1, .. }, .. })
        ));
    }

    #[test]
    fn not_a_catalog() {
        assert!(parse_catalog(r#"{"detail": "Not found."}"#, t0()).is_err());
    }

    #[test]
    fn positions_document() {
        let doc = indoc! {r#"
            {"count": 1, "next": null, "previous": null, "results": [
                {"id": 11, "satellite": 25544, "latitude": 51.2, "longitude": -0.1,
                 "altitude_km": 421.0, "velocity_kmh": 27600.0,
                 "timestamp": "2026-01-01T00:00:10Z", "created_at": "2026-01-01T00:00:11Z"}
            ]}
        "#};
        let positions = parse_positions(doc).unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].satellite_id(), SatelliteId::new(25544));
        let s = positions[0].sample();
        assert_relative_eq!(s.latitude, 51.2);
        assert_relative_eq!(s.altitude_km, 421.0);
    }
}
