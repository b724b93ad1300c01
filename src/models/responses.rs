//! Response DTOs for the HTTP API

use serde::Serialize;

use crate::cache::CacheStats;
use crate::feed::{FeedCacheStats, LiveEntity, Snapshot};

/// Response body for the flight endpoints (GET /flights, GET /flights/latest)
#[derive(Debug, Clone, Serialize)]
pub struct FlightsResponse {
    /// "live" or "fallback"
    pub source: &'static str,
    pub count: usize,
    pub flights: Vec<LiveEntity>,
}

impl From<Snapshot> for FlightsResponse {
    fn from(snapshot: Snapshot) -> Self {
        let source = snapshot.source_label();
        let flights = snapshot.into_inner();
        Self {
            source,
            count: flights.len(),
            flights,
        }
    }
}

/// Statistics of one cache
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub enrichment: CacheStatsResponse,
    pub flight_snapshots: CacheStatsResponse,
    pub flight_details: CacheStatsResponse,
    pub polling: bool,
}

impl StatsResponse {
    pub fn new(enrichment: CacheStats, feed: FeedCacheStats, polling: bool) -> Self {
        Self {
            enrichment: enrichment.into(),
            flight_snapshots: feed.snapshots.into(),
            flight_details: feed.details.into(),
            polling,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Whether a generative provider credential is configured
    pub provider_configured: bool,
    /// Whether a live feed credential is configured
    pub feed_configured: bool,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp.
    ///
    /// Missing credentials degrade the service to fallbacks but never make
    /// it unhealthy.
    pub fn healthy(provider_configured: bool, feed_configured: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            provider_configured,
            feed_configured,
        }
    }
}
