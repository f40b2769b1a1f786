use crate::{
    altitude::AltitudeMapping,
    propagator::PropagatorConfig,
    scene::nominal,
    tracker::TrackFilter,
};
use orbit_protocol::{ApiSatellite, RecordError};
use orbit_types::prelude::*;
use regex::Regex;
use serde::Deserialize;
use std::{collections::HashSet, fs, io, path::Path};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read scene config file '{path}'")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse scene config file")]
    Toml(#[from] toml::de::Error),
    #[error("earth-radius must be a positive number, got {0}")]
    NonPositiveEarthRadius(f64),
    #[error("time-scale must be finite, got {0}")]
    InvalidTimeScale(f64),
    #[error("kepler-iterations must be at least 1")]
    ZeroKeplerIterations,
    #[error("orbit-segments must be at least 3, got {0}")]
    TooFewOrbitSegments(usize),
    #[error("frame-rate must be a positive number, got {0}")]
    InvalidFrameRate(f64),
    #[error("altitude-scale must be a positive number, got {0}")]
    InvalidAltitudeScale(f64),
    #[error("minimum-visible-offset must be a non-negative number, got {0}")]
    InvalidMinimumOffset(f64),
    #[error("Unknown satellite kind '{0}'")]
    UnknownKind(String),
    #[error("Duplicate configuration entry for satellite {0}")]
    DuplicateSatellite(u64),
    #[error("Filter contains an invalid 'matches' regex")]
    Regex(#[from] regex::Error),
    #[error("Configuration entry for satellite {id} is invalid")]
    Satellite {
        id: u64,
        #[source]
        source: RecordError,
    },
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub name: Option<String>,
    pub earth_radius: Option<f64>,
    pub time_scale: Option<f64>,
    pub kepler_iterations: Option<usize>,
    /// [scene units / km]
    pub altitude_scale: Option<f64>,
    pub minimum_visible_offset: Option<f64>,
    pub orbit_segments: Option<usize>,
    pub frame_rate: Option<f64>,
    pub filter: Option<Filter>,
    #[serde(alias = "satellite")]
    pub satellites: Vec<Satellite>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str_checked(&content)
    }

    pub fn from_str_checked(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(s)?;

        if let Some(r) = cfg.earth_radius {
            if !r.is_finite() || r <= 0.0 {
                return Err(ConfigError::NonPositiveEarthRadius(r));
            }
        }
        if let Some(t) = cfg.time_scale {
            if !t.is_finite() {
                return Err(ConfigError::InvalidTimeScale(t));
            }
        }
        if cfg.kepler_iterations == Some(0) {
            return Err(ConfigError::ZeroKeplerIterations);
        }
        if let Some(n) = cfg.orbit_segments {
            if n < crate::orbit_path::MIN_SEGMENTS {
                return Err(ConfigError::TooFewOrbitSegments(n));
            }
        }
        if let Some(hz) = cfg.frame_rate {
            if !hz.is_finite() || hz <= 0.0 {
                return Err(ConfigError::InvalidFrameRate(hz));
            }
        }
        if let Some(s) = cfg.altitude_scale {
            if !s.is_finite() || s <= 0.0 {
                return Err(ConfigError::InvalidAltitudeScale(s));
            }
        }
        if let Some(o) = cfg.minimum_visible_offset {
            if !o.is_finite() || o < 0.0 {
                return Err(ConfigError::InvalidMinimumOffset(o));
            }
        }

        // Compiles the regex and checks the kinds
        cfg.track_filter()?;

        let mut ids = HashSet::new();
        for sat in cfg.satellites.iter() {
            if !ids.insert(sat.id) {
                return Err(ConfigError::DuplicateSatellite(sat.id));
            }
            sat.to_tracked(UtcTimestamp::default())?;
        }

        Ok(cfg)
    }

    pub fn propagator_config(&self) -> PropagatorConfig {
        let nominal = nominal::propagator_config();
        PropagatorConfig {
            earth_radius: self.earth_radius.unwrap_or(nominal.earth_radius),
            time_scale: self.time_scale.unwrap_or(nominal.time_scale),
            kepler_iterations: self.kepler_iterations.unwrap_or(nominal.kepler_iterations),
        }
    }

    /// Altitudes follow the globe's scale unless `altitude-scale` is given
    pub fn altitude_mapping(&self) -> AltitudeMapping {
        let mut m = AltitudeMapping::proportional(
            self.propagator_config().earth_radius,
            self.minimum_visible_offset
                .unwrap_or(nominal::MINIMUM_VISIBLE_OFFSET),
        );
        if let Some(s) = self.altitude_scale {
            m.altitude_scale = s;
        }
        m
    }

    pub fn track_filter(&self) -> Result<TrackFilter, ConfigError> {
        let mut filter = nominal::track_filter();
        let Some(f) = self.filter.as_ref() else {
            return Ok(filter);
        };
        if let Some(active_only) = f.active_only {
            filter.active_only = active_only;
        }
        if let Some(kinds) = f.kinds.as_ref() {
            filter.kinds = kinds
                .iter()
                .map(|k| parse_kind(k))
                .collect::<Result<_, _>>()?;
        }
        if let Some(re) = f.matches.as_ref() {
            filter.matches = Some(Regex::new(re)?);
        }
        if f.max_instances.is_some() {
            filter.max_instances = f.max_instances;
        }
        Ok(filter)
    }

    pub fn tracked_objects(
        &self,
        fallback_epoch: UtcTimestamp,
    ) -> Result<Vec<TrackedObject>, ConfigError> {
        self.satellites
            .iter()
            .map(|s| s.to_tracked(fallback_epoch))
            .collect()
    }
}

/// Like the API's `satellite_type`, but a misspelled kind is an error here
fn parse_kind(s: &str) -> Result<SatelliteKind, ConfigError> {
    let kind = SatelliteKind::from(s);
    if kind == SatelliteKind::Other && !s.trim().eq_ignore_ascii_case("other") {
        Err(ConfigError::UnknownKind(s.to_owned()))
    } else {
        Ok(kind)
    }
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Filter {
    pub active_only: Option<bool>,
    pub kinds: Option<Vec<String>>,
    pub matches: Option<String>,
    pub max_instances: Option<usize>,
}

/// A static catalog entry, with the same field presence rules as an API record
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Satellite {
    pub id: u64,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub is_active: Option<bool>,

    pub epoch: Option<UtcTimestamp>,
    pub mean_motion: Option<f64>,
    pub eccentricity: Option<f64>,
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

impl Satellite {
    pub fn to_tracked(&self, fallback_epoch: UtcTimestamp) -> Result<TrackedObject, ConfigError> {
        let kind = self.kind.as_deref().map(parse_kind).transpose()?;
        let api = ApiSatellite {
            id: None,
            norad_id: Some(self.id),
            name: self.name.clone().unwrap_or_else(|| self.id.to_string()),
            is_active: self.is_active,
            satellite_type: None,
            epoch: self.epoch,
            mean_motion: self.mean_motion,
            eccentricity: self.eccentricity,
            inclination: self.inclination,
            raan: self.raan,
            arg_perigee: self.arg_perigee,
            mean_anomaly: self.mean_anomaly,
            line1: self.line1.clone(),
            line2: self.line2.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            altitude_km: self.altitude_km,
            timestamp: self.timestamp,
        };
        let obj = api
            .into_tracked(fallback_epoch)
            .map_err(|source| ConfigError::Satellite {
                id: self.id,
                source,
            })?;
        Ok(obj.with_kind(kind.unwrap_or_default()))
    }
}
