//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with age tracking.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with its value and storage time.
///
/// The timestamp comes from tokio's clock so paused-time tests can age
/// entries without sleeping.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the value was stored
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with `stored_at`.
    pub fn stored_at(value: V, stored_at: Instant) -> Self {
        Self { value, stored_at }
    }

    // == Age ==
    /// Returns how long the entry has been stored as of `now`.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.stored_at)
    }

    // == Is Expired ==
    /// Checks if the entry is stale for the given TTL.
    ///
    /// Boundary condition: an entry whose age equals the TTL is expired.
    pub fn is_expired_at(&self, now: Instant, ttl: Duration) -> bool {
        self.age_at(now) >= ttl
    }
}
