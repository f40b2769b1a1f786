use thiserror::Error;

/// Why a record could not be placed in the scene
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PositionError {
    #[error("Invalid orbital elements: {0}")]
    InvalidOrbitalElements(ElementsDefect),
    #[error("Invalid geodetic input: {0}")]
    InvalidGeodeticInput(GeodeticDefect),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ElementsDefect {
    #[error("mean motion {0} rev/day is not a positive finite number")]
    MeanMotion(f64),
    #[error("eccentricity {0} is outside [0, 1)")]
    Eccentricity(f64),
    #[error("{0} is not finite")]
    NonFinite(&'static str),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeodeticDefect {
    #[error("latitude {0}° is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0}° is outside [-180, 180]")]
    Longitude(f64),
    #[error("altitude {0} km is not finite")]
    Altitude(f64),
    #[error("radius {0} is not a positive finite number")]
    Radius(f64),
}

impl From<ElementsDefect> for PositionError {
    fn from(value: ElementsDefect) -> Self {
        PositionError::InvalidOrbitalElements(value)
    }
}

impl From<GeodeticDefect> for PositionError {
    fn from(value: GeodeticDefect) -> Self {
        PositionError::InvalidGeodeticInput(value)
    }
}
