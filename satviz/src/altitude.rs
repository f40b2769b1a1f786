use crate::{
    error::{GeodeticDefect, PositionError},
    propagator::EARTH_MEAN_RADIUS,
    scene::nominal,
    units::Length,
};

/// Turns a reported altitude into a distance from the scene origin
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct AltitudeMapping {
    /// [scene units]
    pub earth_radius: f64,
    /// [scene units / km]
    pub altitude_scale: f64,
    /// Smallest height above the globe an object is drawn at [scene units].
    ///
    /// Keeps zero-altitude samples off the surface texture.
    pub minimum_visible_offset: f64,
}

impl Default for AltitudeMapping {
    fn default() -> Self {
        Self::proportional(nominal::EARTH_RADIUS, nominal::MINIMUM_VISIBLE_OFFSET)
    }
}

impl AltitudeMapping {
    /// Altitudes drawn to the same scale as the globe itself
    pub fn proportional(earth_radius: f64, minimum_visible_offset: f64) -> Self {
        Self {
            earth_radius,
            altitude_scale: earth_radius / Length::from_meters(EARTH_MEAN_RADIUS).as_kilometers(),
            minimum_visible_offset,
        }
    }

    /// Negative altitudes are allowed and end up at the minimum offset
    pub fn radius(&self, altitude_km: f64) -> Result<f64, PositionError> {
        if !altitude_km.is_finite() {
            return Err(GeodeticDefect::Altitude(altitude_km).into());
        }
        let offset = f64::max(altitude_km * self.altitude_scale, self.minimum_visible_offset);
        Ok(self.earth_radius + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_scale() {
        let m = AltitudeMapping::default();
        assert_relative_eq!(m.earth_radius, 2.0);
        assert_relative_eq!(m.radius(6371.0).unwrap(), 4.0, max_relative = 1e-12);
        assert_relative_eq!(
            m.radius(420.0).unwrap(),
            2.0 + 420.0 * 2.0 / 6371.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn floor_keeps_objects_off_the_surface() {
        let m = AltitudeMapping::default();
        assert_relative_eq!(m.radius(0.0).unwrap(), 2.01);
        assert_relative_eq!(m.radius(-5.0).unwrap(), 2.01);
        assert_relative_eq!(m.radius(1.0).unwrap(), 2.01);
    }

    #[test]
    fn rejects_non_finite_altitude() {
        let m = AltitudeMapping::default();
        assert!(matches!(
            m.radius(f64::NAN),
            Err(PositionError::InvalidGeodeticInput(GeodeticDefect::Altitude(_)))
        ));
        assert!(matches!(
            m.radius(f64::INFINITY),
            Err(PositionError::InvalidGeodeticInput(GeodeticDefect::Altitude(_)))
        ));
    }
}
