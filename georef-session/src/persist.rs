//! The persistence schema for the four control point pairs.
//!
//! The pairs are stored as one atomic unit under [`STORAGE_KEY`],
//! encoded as a JSON array of exactly four records:
//!
//! ```json
//! [{"pixel": {"x": 12.0, "y": 34.0}, "geo": {"lat": 52.5, "lon": 13.4}}]
//! ```
//!
//! Decoding is strict. A wrong record count, missing or unknown
//! fields, or non-finite numbers reject the whole unit as
//! [`Error::InvalidPersistedData`], which callers treat the same as
//! nothing stored. There is no partial recovery.

use georef_core::{Error, GeoPoint, GroundControlPoint, PixelPoint};
use log::debug;
use serde::{Deserialize, Serialize};

/// The key the control points are stored under.
pub const STORAGE_KEY: &str = "georef.control-points";

/// The persistent key-value store collaborator.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &[u8]);
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredPixel {
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredGeo {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredControlPoint {
    pixel: StoredPixel,
    geo: StoredGeo,
}

impl From<&GroundControlPoint> for StoredControlPoint {
    fn from(control: &GroundControlPoint) -> Self {
        Self {
            pixel: StoredPixel {
                x: control.pixel.x,
                y: control.pixel.y,
            },
            geo: StoredGeo {
                lat: control.geo.lat,
                lon: control.geo.lon,
            },
        }
    }
}

impl StoredControlPoint {
    fn is_finite(&self) -> bool {
        self.pixel.x.is_finite()
            && self.pixel.y.is_finite()
            && self.geo.lat.is_finite()
            && self.geo.lon.is_finite()
    }
}

/// Encodes the four pairs into the stored representation.
pub fn encode(controls: &[GroundControlPoint; 4]) -> Result<Vec<u8>, Error> {
    let records = [
        StoredControlPoint::from(&controls[0]),
        StoredControlPoint::from(&controls[1]),
        StoredControlPoint::from(&controls[2]),
        StoredControlPoint::from(&controls[3]),
    ];
    serde_json::to_vec(&records).map_err(|err| {
        debug!("failed to encode control points: {}", err);
        Error::InvalidPersistedData
    })
}

/// Decodes four pairs from the stored representation, strictly.
///
/// ```
/// use georef_session::persist;
/// assert!(persist::decode(b"[]").is_err());
/// assert!(persist::decode(b"not json").is_err());
/// ```
pub fn decode(bytes: &[u8]) -> Result<[GroundControlPoint; 4], Error> {
    let records: [StoredControlPoint; 4] = serde_json::from_slice(bytes).map_err(|err| {
        debug!("rejecting persisted control points: {}", err);
        Error::InvalidPersistedData
    })?;
    // serde_json parses out-of-range literals like 1e999 to infinity
    // rather than failing.
    if !records.iter().all(StoredControlPoint::is_finite) {
        debug!("rejecting persisted control points: non-finite coordinate");
        return Err(Error::InvalidPersistedData);
    }
    Ok(records.map(|record| {
        GroundControlPoint::new(
            PixelPoint::new(record.pixel.x, record.pixel.y),
            GeoPoint::new(record.geo.lat, record.geo.lon),
        )
    }))
}
