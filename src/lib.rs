//! Geo Insights - enrichment and live flight service for an interactive map
//!
//! Generates country insights, travel recommendations, search rankings and
//! interaction analyses through a remote generative model, and serves live
//! flight positions from an aviation feed. Both upstreams sit behind TTL
//! caches and degrade to documented fallbacks instead of failing.

pub mod api;
pub mod cache;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod feed;
pub mod models;
pub mod parser;
pub mod provider;
pub mod sourced;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use enrichment::EnrichmentClient;
pub use feed::LiveFeedClient;
pub use sourced::Sourced;
