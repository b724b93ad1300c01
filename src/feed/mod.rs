//! Live Feed Module
//!
//! Flight positions from an optional upstream feed, cached for a short
//! window, with synthetic flights standing in when the feed is unusable.

mod client;
mod geo;
mod mock;
mod source;
mod types;

pub use client::{FeedConfig, LiveFeedClient};
pub use geo::{airport_coordinates, heading};
pub use mock::{route_count, synthetic_snapshot};
pub use source::{AviationStackFeed, FeedSource};
pub use types::{FeedCacheStats, GeoPoint, LiveEntity, Snapshot};
