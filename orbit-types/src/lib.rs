extern crate nalgebra as na;

pub mod elements;
pub mod geodetic;
pub mod position;
pub mod prelude;
pub mod record;
pub mod satellite;
pub mod time;
pub mod tle;
