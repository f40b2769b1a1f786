use crate::{error::PositionError, propagator::Orbit};
use orbit_types::prelude::*;
use std::f64::consts::TAU;

pub const MIN_SEGMENTS: usize = 3;

/// One revolution of the orbit as a closed polyline.
///
/// The mean anomaly is stepped uniformly from 0 to 2π, so there are
/// `segments + 1` points and the last repeats the first. Fewer than
/// [`MIN_SEGMENTS`] segments are raised to it.
pub fn orbit_path(orbit: &Orbit, segments: usize) -> Vec<CartesianPosition> {
    let segments = segments.max(MIN_SEGMENTS);
    let mut points: Vec<CartesianPosition> = (0..segments)
        .map(|i| {
            let m = TAU * i as f64 / segments as f64;
            orbit.state_at_mean_anomaly(m).position
        })
        .collect();
    // Exact closure rather than a second evaluation at 2π
    points.push(points[0]);
    points
}

/// Convenience over [`orbit_path`] for raw elements
pub fn orbit_path_for(
    propagator: &crate::propagator::KeplerianPropagator,
    elements: &OrbitalElements,
    segments: usize,
) -> Result<Vec<CartesianPosition>, PositionError> {
    Ok(orbit_path(&propagator.orbit(elements)?, segments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagator::KeplerianPropagator;
    use approx::assert_relative_eq;

    fn elements(e: f64) -> OrbitalElements {
        OrbitalElements {
            mean_motion: 15.5,
            eccentricity: Some(e),
            inclination: 51.6,
            raan: 45.0,
            arg_perigee: 90.0,
            mean_anomaly: 180.0,
            epoch: "2026-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn closed_polyline() {
        let p = KeplerianPropagator::default();
        let path = orbit_path_for(&p, &elements(0.1), 128).unwrap();
        assert_eq!(path.len(), 129);
        assert_eq!(path.first(), path.last());
        assert!(path.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn circular_path_has_constant_radius() {
        let p = KeplerianPropagator::default();
        let a = p.orbit(&elements(0.0)).unwrap().semi_major_axis();
        for point in orbit_path_for(&p, &elements(0.0), 64).unwrap() {
            assert_relative_eq!(point.norm(), a, max_relative = 1e-12);
        }
    }

    #[test]
    fn path_contains_the_propagated_position() {
        // Mean anomaly 180° is sample 32 of 64
        let p = KeplerianPropagator::default();
        let el = elements(0.05);
        let path = orbit_path_for(&p, &el, 64).unwrap();
        let now = p.propagate(&el, el.epoch.into()).unwrap();
        assert!(path[32].distance(&now) < 1e-9);
    }

    #[test]
    fn minimum_segments() {
        let p = KeplerianPropagator::default();
        assert_eq!(orbit_path_for(&p, &elements(0.0), 0).unwrap().len(), 4);
        assert!(orbit_path_for(
            &p,
            &OrbitalElements {
                mean_motion: 0.0,
                ..elements(0.0)
            },
            16
        )
        .is_err());
    }
}
