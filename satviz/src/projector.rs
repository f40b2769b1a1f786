//! Placement of latitude/longitude/altitude samples on the globe.
//!
//! Scene axes: +Y through the north pole, the prime meridian on +X and
//! 90°E on -Z. The 180° longitude offset matches the globe texture's seam.

use crate::{
    altitude::AltitudeMapping,
    error::{GeodeticDefect, PositionError},
};
use orbit_types::prelude::*;
use std::f64::consts::PI;

pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

pub fn check_lat_lon(latitude: f64, longitude: f64) -> Result<(), PositionError> {
    if !LATITUDE_RANGE.contains(&latitude) {
        return Err(GeodeticDefect::Latitude(latitude).into());
    }
    if !LONGITUDE_RANGE.contains(&longitude) {
        return Err(GeodeticDefect::Longitude(longitude).into());
    }
    Ok(())
}

/// Spherical to scene coordinates. Out-of-range inputs are rejected, never clamped.
pub fn geodetic_to_scene(
    latitude: f64,
    longitude: f64,
    radius: f64,
) -> Result<CartesianPosition, PositionError> {
    check_lat_lon(latitude, longitude)?;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GeodeticDefect::Radius(radius).into());
    }

    let phi = (90.0 - latitude) * PI / 180.0;
    let theta = (longitude + 180.0) * PI / 180.0;

    Ok(CartesianPosition::new(
        -(radius * phi.sin() * theta.cos()),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    ))
}

/// Latitude, longitude [deg] and radius of a scene position, the inverse of
/// [`geodetic_to_scene`]. The longitude of a point on the polar axis is 0.
pub fn scene_to_geodetic(p: &CartesianPosition) -> (f64, f64, f64) {
    let radius = p.norm();
    if radius == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let phi = (p.y / radius).clamp(-1.0, 1.0).acos();
    let latitude = 90.0 - phi.to_degrees();
    let longitude = if p.x == 0.0 && p.z == 0.0 {
        0.0
    } else {
        let theta = f64::atan2(p.z, -p.x).to_degrees();
        // theta is in (-180, 180], shift back to the prime meridian
        let lon = theta - 180.0;
        if lon < -180.0 {
            lon + 360.0
        } else {
            lon
        }
    };
    (latitude, longitude, radius)
}

#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct GeodeticProjector {
    altitude: AltitudeMapping,
}

impl GeodeticProjector {
    pub fn new(altitude: AltitudeMapping) -> Self {
        Self { altitude }
    }

    pub fn altitude_mapping(&self) -> &AltitudeMapping {
        &self.altitude
    }

    pub fn project(&self, sample: &GeodeticSample) -> Result<CartesianPosition, PositionError> {
        check_lat_lon(sample.latitude, sample.longitude)?;
        let radius = self.altitude.radius(sample.altitude_km)?;
        geodetic_to_scene(sample.latitude, sample.longitude, radius)
    }
}
