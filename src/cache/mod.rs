//! Cache Module
//!
//! Provides in-memory caching with lazy TTL expiration, shared by the
//! enrichment and live feed clients.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TtlCache;
