pub extern crate nalgebra as na;

pub mod altitude;
pub mod catalog;
pub mod clock;
pub mod error;
pub mod geodesy;
pub mod orbit_path;
pub mod projector;
pub mod propagator;
pub mod scene;
pub mod tracker;
pub mod units;

pub use crate::error::{ElementsDefect, GeodeticDefect, PositionError};
pub use crate::projector::{geodetic_to_scene, GeodeticProjector};
pub use crate::propagator::{KeplerianPropagator, PropagatorConfig};
