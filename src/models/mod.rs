//! Request and Response models for the HTTP API
//!
//! DTOs for request and response bodies that are not client result types
//! serialized directly.

pub mod requests;
pub mod responses;

pub use requests::{AnalyzeRequest, SearchRequest};
pub use responses::{CacheStatsResponse, FlightsResponse, HealthResponse, StatsResponse};
