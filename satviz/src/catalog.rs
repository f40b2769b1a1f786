//! Loading tracked objects from catalog documents and TLE files

use crate::tracker::Tracker;
use orbit_protocol::{
    parse_catalog, parse_positions, parse_tle_elements, parse_unstructured_tle_set, ApiPosition,
};
use orbit_types::prelude::*;
use std::{fs, io, path::Path};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read '{path}'")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("'{path}' is not a satellite API document")]
    Document {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("'{path}' is not a TLE set: {reason}")]
    TleSet { path: String, reason: String },
}

fn read(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Objects of a catalog JSON document. Records that cannot be placed are
/// logged and left out.
pub fn load_catalog_file<P: AsRef<Path>>(
    path: P,
    fallback_epoch: UtcTimestamp,
) -> Result<Vec<TrackedObject>, CatalogError> {
    let path = path.as_ref();
    let doc = read(path)?;
    let records = parse_catalog(&doc, fallback_epoch).map_err(|source| CatalogError::Document {
        path: path.display().to_string(),
        source,
    })?;
    let total = records.len();
    let objects: Vec<TrackedObject> = records
        .into_iter()
        .filter_map(|r| match r {
            Ok(obj) => Some(obj),
            Err(e) => {
                warn!(catalog = %path.display(), error = %e, "Skipping catalog record");
                None
            }
        })
        .collect();
    info!(catalog = %path.display(), loaded = objects.len(), total, "Loaded catalog");
    Ok(objects)
}

/// Records of a positions JSON document, paginated or a bare array
pub fn load_positions_file<P: AsRef<Path>>(path: P) -> Result<Vec<ApiPosition>, CatalogError> {
    let path = path.as_ref();
    let doc = read(path)?;
    let positions = parse_positions(&doc).map_err(|source| CatalogError::Document {
        path: path.display().to_string(),
        source,
    })?;
    info!(positions = %path.display(), loaded = positions.len(), "Loaded positions");
    Ok(positions)
}

/// Objects of a three-line TLE file. The catalog number comes from line 1.
pub fn load_tle_file<P: AsRef<Path>>(path: P) -> Result<Vec<TrackedObject>, CatalogError> {
    let path = path.as_ref();
    let content = read(path)?;
    let objects = tle_objects(&content).map_err(|reason| CatalogError::TleSet {
        path: path.display().to_string(),
        reason,
    })?;
    info!(tle = %path.display(), loaded = objects.len(), "Loaded TLE set");
    Ok(objects)
}

/// Entries with a bad catalog number or bad fields are logged and left out
pub fn tle_objects(content: &str) -> Result<Vec<TrackedObject>, String> {
    // The nom error borrows the input, keep only its message
    let (_, set) = parse_unstructured_tle_set(content).map_err(|e| e.to_string())?;
    Ok(set
        .into_iter()
        .filter_map(|tle| {
            let Some(id) = tle.catalog_number() else {
                warn!(name = tle.name(), "TLE entry has no catalog number");
                return None;
            };
            match parse_tle_elements(&tle) {
                Ok(elements) => Some(TrackedObject::new(id, tle.name(), elements.into())),
                Err(e) => {
                    warn!(name = tle.name(), %id, error = %e, "Skipping TLE entry");
                    None
                }
            }
        })
        .collect())
}

/// Adds every catalog and TLE file to the tracker, later entries replacing earlier ones
pub fn load_into<C, T>(
    tracker: &mut Tracker,
    catalogs: &[C],
    tles: &[T],
    fallback_epoch: UtcTimestamp,
) -> Result<(), CatalogError>
where
    C: AsRef<Path>,
    T: AsRef<Path>,
{
    let mut objects = Vec::new();
    for path in catalogs {
        objects.extend(load_catalog_file(path, fallback_epoch)?);
    }
    for path in tles {
        objects.extend(load_tle_file(path)?);
    }
    for obj in objects {
        let id = obj.id;
        if tracker.insert(obj).is_some() {
            warn!(%id, "Satellite listed more than once, keeping the last entry");
        }
    }
    Ok(())
}
