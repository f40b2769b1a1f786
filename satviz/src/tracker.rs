//! Per-frame placement of every tracked object.

use crate::{
    error::PositionError,
    geodesy::euclidean_distance,
    projector::{scene_to_geodetic, GeodeticProjector},
    propagator::{KeplerianPropagator, EARTH_MEAN_RADIUS},
    units::{Length, Timestamp},
};
use derive_more::Display;
use orbit_protocol::{ApiPosition, LiveMessage};
use orbit_types::prelude::*;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Which objects get placed each frame
#[derive(Clone, Debug)]
pub struct TrackFilter {
    pub active_only: bool,
    pub kinds: BTreeSet<SatelliteKind>,
    /// Matched against the name and the catalog number
    pub matches: Option<Regex>,
    /// Applied after the other criteria, in catalog number order
    pub max_instances: Option<usize>,
}

impl Default for TrackFilter {
    fn default() -> Self {
        Self {
            active_only: false,
            kinds: SatelliteKind::ALL.into_iter().collect(),
            matches: None,
            max_instances: None,
        }
    }
}

impl TrackFilter {
    pub fn accepts(&self, obj: &TrackedObject) -> bool {
        if self.active_only && !obj.is_active {
            return false;
        }
        if !self.kinds.contains(&obj.kind) {
            return false;
        }
        match &self.matches {
            Some(re) => re.is_match(&obj.name) || re.is_match(&obj.id.to_string()),
            None => true,
        }
    }
}

/// What a placed position was computed from
#[derive(Copy, Clone, Eq, PartialEq, Debug, Display)]
pub enum PositionSource {
    #[display(fmt = "elements")]
    Elements,
    #[display(fmt = "sample")]
    Sample,
    #[display(fmt = "live")]
    LiveSample,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PlacedObject {
    pub id: SatelliteId,
    pub kind: SatelliteKind,
    pub position: CartesianPosition,
    pub source: PositionSource,
}

#[derive(Clone, PartialEq, Debug)]
pub struct SkippedObject {
    pub id: SatelliteId,
    pub error: PositionError,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Frame {
    pub timestamp: Timestamp,
    pub positions: Vec<PlacedObject>,
    pub skipped: Vec<SkippedObject>,
}

#[derive(Clone, Debug, Default)]
pub struct Tracker {
    propagator: KeplerianPropagator,
    projector: GeodeticProjector,
    filter: TrackFilter,
    objects: BTreeMap<SatelliteId, TrackedObject>,
    live: HashMap<SatelliteId, GeodeticSample>,
}

impl Tracker {
    pub fn new(
        propagator: KeplerianPropagator,
        projector: GeodeticProjector,
        filter: TrackFilter,
    ) -> Self {
        Self {
            propagator,
            projector,
            filter,
            objects: Default::default(),
            live: Default::default(),
        }
    }

    pub fn propagator(&self) -> &KeplerianPropagator {
        &self.propagator
    }

    pub fn projector(&self) -> &GeodeticProjector {
        &self.projector
    }

    pub fn filter(&self) -> &TrackFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: TrackFilter) {
        self.filter = filter;
    }

    /// Returns the object previously tracked under the same id
    pub fn insert(&mut self, obj: TrackedObject) -> Option<TrackedObject> {
        self.objects.insert(obj.id, obj)
    }

    pub fn get(&self, id: SatelliteId) -> Option<&TrackedObject> {
        self.objects.get(&id)
    }

    pub fn objects(&self) -> impl Iterator<Item = &TrackedObject> {
        self.objects.values()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn live_sample(&self, id: SatelliteId) -> Option<&GeodeticSample> {
        self.live.get(&id)
    }

    /// Keeps the newer of the stored and the reported sample
    fn report_position(&mut self, id: SatelliteId, sample: GeodeticSample) {
        if !self.objects.contains_key(&id) {
            debug!(%id, "Position for an untracked satellite");
            return;
        }
        let newest = match self.live.get(&id) {
            Some(prev) => *prev.latest(&sample),
            None => sample,
        };
        self.live.insert(id, newest);
    }

    pub fn apply(&mut self, msg: &LiveMessage) {
        match msg {
            LiveMessage::Position(p) => self.report_position(p.satellite_id(), p.sample()),
            LiveMessage::Status(s) => match self.objects.get_mut(&s.satellite_id()) {
                Some(obj) => obj.is_active = s.is_active,
                None => debug!(id = %s.satellite_id(), "Status update for an untracked satellite"),
            },
            LiveMessage::Heartbeat | LiveMessage::Unsupported(_) => (),
        }
    }

    /// A record of a positions document, handled like a pushed position
    pub fn apply_position(&mut self, p: &ApiPosition) {
        self.report_position(p.satellite_id(), p.sample());
    }

    /// Scene position of one object at `at`
    pub fn locate(
        &self,
        obj: &TrackedObject,
        at: Timestamp,
    ) -> Result<(CartesianPosition, PositionSource), PositionError> {
        let live = self.live.get(&obj.id);
        match &obj.record {
            OrbitalRecord::Elements(el) => match self.propagator.propagate(el, at) {
                Ok(p) => Ok((p, PositionSource::Elements)),
                Err(e) => match live {
                    Some(s) => Ok((self.projector.project(s)?, PositionSource::LiveSample)),
                    None => Err(e),
                },
            },
            OrbitalRecord::Sample(s) => match live {
                Some(l) if l.timestamp > s.timestamp => {
                    Ok((self.projector.project(l)?, PositionSource::LiveSample))
                }
                _ => Ok((self.projector.project(s)?, PositionSource::Sample)),
            },
        }
    }

    /// Places every object passing the filter. Failures are collected, never fatal.
    pub fn frame(&self, at: Timestamp) -> Frame {
        let mut frame = Frame {
            timestamp: at,
            positions: Vec::new(),
            skipped: Vec::new(),
        };

        let selected = self
            .objects
            .values()
            .filter(|o| self.filter.accepts(o))
            .take(self.filter.max_instances.unwrap_or(usize::MAX));

        for obj in selected {
            match self.locate(obj, at) {
                Ok((position, source)) => frame.positions.push(PlacedObject {
                    id: obj.id,
                    kind: obj.kind,
                    position,
                    source,
                }),
                Err(error) => {
                    debug!(id = %obj.id, name = %obj.name, %error, "Skipping satellite");
                    frame.skipped.push(SkippedObject { id: obj.id, error });
                }
            }
        }

        frame
    }

    /// Physical latitude, longitude and altitude behind a placed position.
    ///
    /// Samples are returned as reported. Propagated positions are scaled back
    /// from scene units, the display altitude mapping plays no part.
    fn physical_sample(&self, placed: &PlacedObject, at: Timestamp) -> Option<GeodeticSample> {
        match placed.source {
            PositionSource::Elements => {
                let (latitude, longitude, radius) = scene_to_geodetic(&placed.position);
                let earth_radii = radius / self.propagator.config().earth_radius;
                let altitude = Length::from_meters(EARTH_MEAN_RADIUS * (earth_radii - 1.0));
                Some(GeodeticSample::new(
                    latitude,
                    longitude,
                    altitude.as_kilometers(),
                    *at.as_utc(),
                ))
            }
            PositionSource::Sample => match &self.objects.get(&placed.id)?.record {
                OrbitalRecord::Sample(s) => Some(*s),
                OrbitalRecord::Elements(_) => None,
            },
            PositionSource::LiveSample => self.live.get(&placed.id).copied(),
        }
    }

    /// Nearest placed object to a ground or airborne observer
    pub fn closest_to(
        &self,
        frame: &Frame,
        observer: &GeodeticSample,
    ) -> Result<Option<(SatelliteId, Length)>, PositionError> {
        let mut closest: Option<(SatelliteId, Length)> = None;
        for placed in frame.positions.iter() {
            let Some(at) = self.physical_sample(placed, frame.timestamp) else {
                debug!(id = %placed.id, "Placed object is no longer tracked");
                continue;
            };
            let d = euclidean_distance(observer, &at)?;
            if closest.map(|(_, best)| d < best).unwrap_or(true) {
                closest = Some((placed.id, d));
            }
        }
        Ok(closest)
    }
}
