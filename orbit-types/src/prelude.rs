pub use crate::elements::OrbitalElements;
pub use crate::geodetic::GeodeticSample;
pub use crate::position::CartesianPosition;
pub use crate::record::OrbitalRecord;
pub use crate::satellite::{SatelliteId, SatelliteKind, TrackedObject};
pub use crate::time::UtcTimestamp;
pub use crate::tle::UnstructuredTle;
