use orbit_types::prelude::*;
use std::path::Path;
use tracing::info;

use self::config::{Config, ConfigError};
use crate::{
    altitude::AltitudeMapping,
    projector::GeodeticProjector,
    propagator::{KeplerianPropagator, PropagatorConfig},
    tracker::{TrackFilter, Tracker},
    units::Time,
};

pub mod config;
pub mod nominal;

#[derive(Debug, Clone)]
pub struct Scene {
    pub name: Option<String>,
    pub propagator_config: PropagatorConfig,
    pub altitude_mapping: AltitudeMapping,
    pub filter: TrackFilter,
    pub orbit_segments: usize,
    pub frame_rate: f64,
    /// Static entries, merged with whatever catalogs get loaded
    pub satellites: Vec<TrackedObject>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            name: None,
            propagator_config: nominal::propagator_config(),
            altitude_mapping: nominal::altitude_mapping(),
            filter: nominal::track_filter(),
            orbit_segments: nominal::ORBIT_SEGMENTS,
            frame_rate: nominal::FRAME_RATE,
            satellites: Vec::new(),
        }
    }
}

impl Scene {
    /// `fallback_epoch` stands in for entries without an epoch or timestamp
    pub fn load<P: AsRef<Path>>(
        config: Option<P>,
        fallback_epoch: UtcTimestamp,
    ) -> Result<Self, ConfigError> {
        let Some(cfg_path) = config.as_ref() else {
            info!("Loading default nominal scene");
            return Ok(Self::default());
        };

        info!(
            config = %cfg_path.as_ref().display(),
            "Loading scene from config file",
        );
        let cfg = Config::load(cfg_path)?;
        Self::from_config(&cfg, fallback_epoch)
    }

    pub fn from_config(cfg: &Config, fallback_epoch: UtcTimestamp) -> Result<Self, ConfigError> {
        Ok(Self {
            name: cfg.name.clone(),
            propagator_config: cfg.propagator_config(),
            altitude_mapping: cfg.altitude_mapping(),
            filter: cfg.track_filter()?,
            orbit_segments: cfg.orbit_segments.unwrap_or(nominal::ORBIT_SEGMENTS),
            frame_rate: cfg.frame_rate.unwrap_or(nominal::FRAME_RATE),
            satellites: cfg.tracked_objects(fallback_epoch)?,
        })
    }

    pub fn propagator(&self) -> KeplerianPropagator {
        KeplerianPropagator::new(self.propagator_config)
    }

    pub fn projector(&self) -> GeodeticProjector {
        GeodeticProjector::new(self.altitude_mapping)
    }

    /// Tracker holding the scene's static satellites
    pub fn tracker(&self) -> Tracker {
        let mut tracker = Tracker::new(self.propagator(), self.projector(), self.filter.clone());
        for sat in self.satellites.iter().cloned() {
            tracker.insert(sat);
        }
        tracker
    }

    pub fn frame_period(&self) -> Time {
        Time::from_secs(1.0 / self.frame_rate)
    }
}
