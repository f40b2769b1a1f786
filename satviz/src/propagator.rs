//! Two-body Keplerian propagation of catalog elements into scene coordinates.
//!
//! There are no perturbations and no Earth rotation. The positions are for
//! drawing, not for pointing antennas.

use crate::{
    error::{ElementsDefect, PositionError},
    units::{Angle, Length, Timestamp},
};
use na::{Rotation3, Vector3};
use orbit_types::prelude::*;
use std::f64::consts::TAU;

/// Earth's standard gravitational parameter [m^3/s^2]
pub const EARTH_MU: f64 = 3.986004418e14;

/// Mean Earth radius [m], the physical length of one scene Earth radius
pub const EARTH_MEAN_RADIUS: f64 = 6_371_000.0;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fixed-point refinements of Kepler's equation. Enough for e < 0.3.
pub const DEFAULT_KEPLER_ITERATIONS: usize = 5;

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PropagatorConfig {
    /// Radius of the rendered globe [scene units]
    pub earth_radius: f64,
    /// Multiplier on elapsed time since epoch, > 1 fast-forwards
    pub time_scale: f64,
    pub kepler_iterations: usize,
}

impl Default for PropagatorConfig {
    fn default() -> Self {
        crate::scene::nominal::propagator_config()
    }
}

/// The anomalies and resulting position for one instant
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct OrbitState {
    /// [rad], in [0, 2π)
    pub mean_anomaly: f64,
    /// [rad]
    pub eccentric_anomaly: f64,
    /// [rad]
    pub true_anomaly: f64,
    /// Distance from the Earth's center [scene units]
    pub radius: f64,
    /// Earth-centered inertial orientation, Z toward the north pole
    pub inertial: CartesianPosition,
    /// Y-up scene orientation shared with the geodetic projector
    pub position: CartesianPosition,
}

/// Validated elements with everything that does not depend on time precomputed
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Orbit {
    epoch: Timestamp,
    /// [rev/s]
    mean_motion: f64,
    eccentricity: f64,
    /// [rad]
    mean_anomaly_at_epoch: f64,
    /// [scene units]
    semi_major_axis: f64,
    perifocal_to_inertial: Rotation3<f64>,
    kepler_iterations: usize,
}

impl Orbit {
    pub fn new(
        elements: &OrbitalElements,
        earth_radius: f64,
        kepler_iterations: usize,
    ) -> Result<Self, PositionError> {
        let n = elements.mean_motion;
        if !n.is_finite() || n <= 0.0 {
            return Err(ElementsDefect::MeanMotion(n).into());
        }
        let e = elements.eccentricity_or_circular();
        if !(0.0..1.0).contains(&e) {
            return Err(ElementsDefect::Eccentricity(e).into());
        }
        for (name, v) in [
            ("inclination", elements.inclination),
            ("raan", elements.raan),
            ("argument of perigee", elements.arg_perigee),
            ("mean anomaly", elements.mean_anomaly),
        ] {
            if !v.is_finite() {
                return Err(ElementsDefect::NonFinite(name).into());
            }
        }

        let earth_radii = semi_major_axis(n) / Length::from_meters(EARTH_MEAN_RADIUS);

        Ok(Self {
            epoch: Timestamp::from_utc(elements.epoch),
            mean_motion: n / SECONDS_PER_DAY,
            eccentricity: e,
            mean_anomaly_at_epoch: Angle::from_degrees(elements.mean_anomaly)
                .normalized()
                .as_radians(),
            semi_major_axis: earth_radii.as_f64() * earth_radius,
            perifocal_to_inertial: perifocal_to_inertial(
                Angle::from_degrees(elements.raan).normalized(),
                Angle::from_degrees(elements.inclination).normalized(),
                Angle::from_degrees(elements.arg_perigee).normalized(),
            ),
            kepler_iterations,
        })
    }

    /// [scene units]
    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// Mean anomaly after `elapsed_secs` of (already scaled) time since epoch
    pub fn mean_anomaly_after(&self, elapsed_secs: f64) -> f64 {
        // Only the fractional revolution matters, dropping whole turns first
        // keeps precision over long fast-forwarded sessions
        let revs = (self.mean_motion * elapsed_secs).fract();
        wrap_radians(self.mean_anomaly_at_epoch + revs * TAU)
    }

    pub fn state_at(&self, at: Timestamp, time_scale: f64) -> OrbitState {
        let elapsed = (at - self.epoch) * time_scale;
        self.state_at_mean_anomaly(self.mean_anomaly_after(elapsed.as_secs()))
    }

    pub fn state_at_mean_anomaly(&self, mean_anomaly: f64) -> OrbitState {
        let e = self.eccentricity;
        let m = wrap_radians(mean_anomaly);
        let ecc = solve_kepler(m, e, self.kepler_iterations);
        let nu = true_anomaly(ecc, e);
        let r = self.semi_major_axis * (1.0 - e * ecc.cos());

        let perifocal = Vector3::new(r * nu.cos(), r * nu.sin(), 0.0);
        let inertial = self.perifocal_to_inertial * perifocal;

        OrbitState {
            mean_anomaly: m,
            eccentric_anomaly: ecc,
            true_anomaly: nu,
            radius: r,
            inertial: inertial.into(),
            position: inertial_to_scene(&inertial),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct KeplerianPropagator {
    config: PropagatorConfig,
}

impl KeplerianPropagator {
    pub fn new(config: PropagatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PropagatorConfig {
        &self.config
    }

    pub fn orbit(&self, elements: &OrbitalElements) -> Result<Orbit, PositionError> {
        Orbit::new(
            elements,
            self.config.earth_radius,
            self.config.kepler_iterations,
        )
    }

    pub fn state(
        &self,
        elements: &OrbitalElements,
        at: Timestamp,
    ) -> Result<OrbitState, PositionError> {
        Ok(self.orbit(elements)?.state_at(at, self.config.time_scale))
    }

    /// Scene position of the object at `at`
    pub fn propagate(
        &self,
        elements: &OrbitalElements,
        at: Timestamp,
    ) -> Result<CartesianPosition, PositionError> {
        Ok(self.state(elements, at)?.position)
    }

    /// Position at `at` in the Earth-centered inertial orientation
    pub fn propagate_inertial(
        &self,
        elements: &OrbitalElements,
        at: Timestamp,
    ) -> Result<CartesianPosition, PositionError> {
        Ok(self.state(elements, at)?.inertial)
    }
}

/// Kepler's third law, from mean motion [rev/day]
pub fn semi_major_axis(mean_motion: f64) -> Length {
    let n = mean_motion * TAU / SECONDS_PER_DAY;
    Length::from_meters((EARTH_MU / (n * n)).cbrt())
}

/// Fixed-point iteration of `E = M + e·sin(E)` seeded at `E = M`.
///
/// This is a fixed number of refinements, not a convergence loop. The error
/// shrinks roughly by a factor of `e` each pass, good for the low eccentricity
/// of most Earth orbiters and still finite (but coarse) near e = 1.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64, iterations: usize) -> f64 {
    let mut ecc = mean_anomaly;
    for _ in 0..iterations {
        ecc = mean_anomaly + eccentricity * ecc.sin();
    }
    ecc
}

/// Half-angle form, quadrant-safe through atan2
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = eccentric_anomaly / 2.0;
    2.0 * f64::atan2(
        (1.0 + eccentricity).sqrt() * half.sin(),
        (1.0 - eccentricity).sqrt() * half.cos(),
    )
}

/// R = Rz(raan) · Rx(inclination) · Rz(argument of perigee)
pub fn perifocal_to_inertial(
    raan: Angle,
    inclination: Angle,
    arg_perigee: Angle,
) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), raan.as_radians())
        * Rotation3::from_axis_angle(&Vector3::x_axis(), inclination.as_radians())
        * Rotation3::from_axis_angle(&Vector3::z_axis(), arg_perigee.as_radians())
}

/// Inertial Z (north) becomes scene +Y, inertial Y becomes scene -Z.
///
/// This is the same relation the geodetic projector uses between Earth-fixed
/// directions and scene axes.
pub fn inertial_to_scene(v: &Vector3<f64>) -> CartesianPosition {
    CartesianPosition::new(v.x, v.z, -v.y)
}

/// Wrapped into [0, 2π)
pub fn wrap_radians(r: f64) -> f64 {
    let w = r.rem_euclid(TAU);
    if w >= TAU {
        0.0
    } else {
        w
    }
}
