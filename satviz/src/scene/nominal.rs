use crate::{
    altitude::AltitudeMapping,
    propagator::{PropagatorConfig, DEFAULT_KEPLER_ITERATIONS},
    tracker::TrackFilter,
};

/// Radius of the rendered globe [scene units]
pub const EARTH_RADIUS: f64 = 2.0;
pub const TIME_SCALE: f64 = 1.0;
/// [scene units]
pub const MINIMUM_VISIBLE_OFFSET: f64 = 0.01;
pub const ORBIT_SEGMENTS: usize = 128;
/// [Hz]
pub const FRAME_RATE: f64 = 30.0;

pub fn propagator_config() -> PropagatorConfig {
    PropagatorConfig {
        earth_radius: EARTH_RADIUS,
        time_scale: TIME_SCALE,
        kepler_iterations: DEFAULT_KEPLER_ITERATIONS,
    }
}

pub fn altitude_mapping() -> AltitudeMapping {
    AltitudeMapping::proportional(EARTH_RADIUS, MINIMUM_VISIBLE_OFFSET)
}

pub fn track_filter() -> TrackFilter {
    TrackFilter::default()
}
