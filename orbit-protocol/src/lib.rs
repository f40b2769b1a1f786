pub use crate::api::{
    parse_catalog, parse_positions, ApiPosition, ApiSatellite, Paginated, RecordError,
};
pub use crate::live::{parse_live_message, LiveMessage, LivePosition, LiveStatus};
pub use crate::parser::{parse_tle_elements, parse_unstructured_tle_set, ParseError, TleError};

pub mod api;
pub mod live;
pub mod parser;
