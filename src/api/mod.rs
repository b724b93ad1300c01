//! API Module
//!
//! HTTP handlers and routing for the enrichment and flight REST API.
//!
//! # Endpoints
//! - `GET /countries/:name/insight` - Structured facts about a country
//! - `GET /countries/:name/recommendations` - Must-visit places
//! - `POST /search` - Rank candidate countries for a query
//! - `POST /interactions/analyze` - Read an interaction history
//! - `GET /flights` - Current flights
//! - `GET /flights/latest` - Last polled flights
//! - `GET /flights/:id` - One flight
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
