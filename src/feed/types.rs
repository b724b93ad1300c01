//! Live feed entity types.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::sourced::Sourced;

// == Geo Point ==
/// Longitude/latitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Point at `fraction` of the straight lon/lat segment from `self` to `to`.
    pub fn lerp(self, to: GeoPoint, fraction: f64) -> GeoPoint {
        GeoPoint {
            lon: self.lon + (to.lon - self.lon) * fraction,
            lat: self.lat + (to.lat - self.lat) * fraction,
        }
    }
}

// == Live Entity ==
/// One aircraft as drawn on the map.
///
/// Rebuilt wholesale on every refresh; only `id` is stable across refreshes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEntity {
    pub id: String,
    /// Flight number shown next to the marker
    pub label: String,
    pub airline: String,
    pub position: GeoPoint,
    /// Feet
    pub altitude: f64,
    /// Knots for synthetic data, feed units otherwise
    pub speed: f64,
    /// Degrees clockwise from north, in [0, 360)
    pub heading: f64,
    pub origin_key: String,
    pub destination_key: String,
    pub route_path: Vec<GeoPoint>,
}

/// Flights delivered on each refresh, tagged live or synthetic.
pub type Snapshot = Sourced<Vec<LiveEntity>>;

/// Statistics for both feed caches.
#[derive(Debug, Clone, Serialize)]
pub struct FeedCacheStats {
    pub snapshots: CacheStats,
    pub details: CacheStats,
}
