//! Enrichment Module
//!
//! Country insights, place recommendations, search ranking and interaction
//! analysis generated by a remote model, with caching, retry and fallbacks.

mod client;
mod prompts;
mod types;

pub use client::{substring_search, summarize, EnrichmentClient, EnrichmentConfig};
pub use types::{
    CountryInsight, Interaction, InteractionAnalysis, InteractionSummary, PlaceCategory,
    PlaceRecommendation, MAX_DESCRIPTION_CHARS, MAX_FACT_CHARS, MAX_RECOMMENDATIONS,
    MAX_SEARCH_RESULTS,
};
