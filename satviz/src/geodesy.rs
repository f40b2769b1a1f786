use crate::{
    error::{GeodeticDefect, PositionError},
    projector::check_lat_lon,
    units::Length,
};
use nav_types::{ECEF, WGS84};
use orbit_types::prelude::*;

/// Rejects what the WGS-84 conversion cannot take
pub fn check_sample(s: &GeodeticSample) -> Result<(), PositionError> {
    check_lat_lon(s.latitude, s.longitude)?;
    if !s.altitude_km.is_finite() {
        return Err(GeodeticDefect::Altitude(s.altitude_km).into());
    }
    Ok(())
}

fn to_ecef(s: &GeodeticSample) -> Result<ECEF<f64>, PositionError> {
    // nav-types asserts on out-of-range input, check first
    check_sample(s)?;
    let altitude = Length::from_kilometers(s.altitude_km);
    Ok(ECEF::from(WGS84::from_degrees_and_meters(
        s.latitude,
        s.longitude,
        altitude.as_meters(),
    )))
}

/// Straight-line distance between two samples on the WGS-84 ellipsoid
pub fn euclidean_distance(a: &GeodeticSample, b: &GeodeticSample) -> Result<Length, PositionError> {
    let a_e = to_ecef(a)?;
    let b_e = to_ecef(b)?;
    Ok(Length::from_meters(a_e.distance(&b_e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample(lat: f64, lon: f64, alt_km: f64) -> GeodeticSample {
        GeodeticSample::new(lat, lon, alt_km, "2026-01-01T00:00:00Z".parse().unwrap())
    }

    #[test]
    fn same_point_is_zero() {
        let a = sample(51.5, -0.1, 0.4);
        assert_relative_eq!(euclidean_distance(&a, &a).unwrap().as_meters(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn straight_up() {
        let ground = sample(10.0, 20.0, 0.0);
        let above = sample(10.0, 20.0, 420.0);
        assert_relative_eq!(
            euclidean_distance(&ground, &above).unwrap().as_kilometers(),
            420.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn through_the_earth() {
        // Opposite points on the equator, two equatorial radii apart
        let d = euclidean_distance(&sample(0.0, 0.0, 0.0), &sample(0.0, 180.0, 0.0)).unwrap();
        assert_relative_eq!(d.as_meters(), 2.0 * 6_378_137.0, max_relative = 1e-9);
    }

    #[test]
    fn symmetric() {
        let a = sample(-33.9, 151.2, 0.0);
        let b = sample(40.7, -74.0, 550.0);
        assert_eq!(euclidean_distance(&a, &b), euclidean_distance(&b, &a));
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            euclidean_distance(&sample(91.0, 0.0, 0.0), &sample(0.0, 0.0, 0.0)),
            Err(GeodeticDefect::Latitude(91.0).into())
        );
        assert!(euclidean_distance(&sample(0.0, 0.0, 0.0), &sample(0.0, 0.0, f64::NAN)).is_err());
    }
}
