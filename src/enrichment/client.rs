//! Enrichment Client
//!
//! Cached, retrying front over an [`InsightProvider`]. Every public operation
//! is total: provider and parse failures become the documented fallback (or
//! `None` for interaction analysis) and are only visible in the logs.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::prompts;
use super::types::{
    truncate_chars, CountryInsight, Interaction, InteractionAnalysis, InteractionSummary,
    PlaceRecommendation, MAX_DESCRIPTION_CHARS, MAX_RECOMMENDATIONS, MAX_SEARCH_RESULTS,
};
use crate::cache::{CacheStats, TtlCache};
use crate::config::Config;
use crate::error::{AtlasError, Result};
use crate::parser::{self, Shape};
use crate::provider::InsightProvider;
use crate::sourced::Sourced;

/// Retry budget for cheap, interactive calls (search, analysis)
const INTERACTIVE_MAX_RETRIES: u32 = 1;

// == Enrichment Config ==
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// Lifetime of generated text in the cache
    pub cache_ttl: Duration,
    /// Attempt N waits N units before retrying
    pub retry_unit: Duration,
    /// Extra attempts after the first failure
    pub max_retries: u32,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(3600),
            retry_unit: Duration::from_secs(1),
            max_retries: 2,
        }
    }
}

impl From<&Config> for EnrichmentConfig {
    fn from(config: &Config) -> Self {
        Self {
            cache_ttl: config.ai_cache_ttl(),
            retry_unit: config.ai_retry_unit(),
            max_retries: config.ai_max_retries,
        }
    }
}

// == Enrichment Client ==
pub struct EnrichmentClient {
    /// `None` when no credential is configured
    provider: Option<Arc<dyn InsightProvider>>,
    /// Raw generated text keyed by purpose and entity
    cache: RwLock<TtlCache<String, String>>,
    retry_unit: Duration,
    max_retries: u32,
}

impl EnrichmentClient {
    pub fn new(provider: Option<Arc<dyn InsightProvider>>, config: EnrichmentConfig) -> Self {
        if provider.is_none() {
            warn!("No generative provider configured; enrichment will serve fallbacks");
        }
        Self {
            provider,
            cache: RwLock::new(TtlCache::new(config.cache_ttl)),
            retry_unit: config.retry_unit,
            max_retries: config.max_retries,
        }
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    // == Generate ==
    /// Returns generated text for `prompt`, from the cache when fresh.
    ///
    /// Makes at most `max_retries + 1` provider calls, waiting
    /// `attempt × retry_unit` between them. Only successful text is cached.
    #[instrument(skip(self, prompt))]
    pub async fn generate(&self, prompt: &str, cache_key: &str, max_retries: u32) -> Result<String> {
        let Some(provider) = &self.provider else {
            return Err(AtlasError::ProviderUnavailable(
                "generative provider not configured".to_string(),
            ));
        };

        let key = cache_key.to_string();
        if let Some(text) = self.cache.write().await.get(&key) {
            debug!("Cache hit");
            return Ok(text);
        }

        let attempts = max_retries.saturating_add(1);
        let mut attempt: u32 = 1;
        loop {
            match provider.generate_text(prompt).await {
                Ok(text) => {
                    self.cache.write().await.set(key, text.clone());
                    return Ok(text);
                }
                Err(e) if attempt < attempts => {
                    warn!(attempt, error = %e, "Generation attempt failed, retrying");
                    tokio::time::sleep(self.retry_unit * attempt).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Generation attempt failed, giving up");
                    return Err(AtlasError::GenerationFailed { attempts, source: e });
                }
            }
        }
    }

    // == Country Insight ==
    /// Structured facts about `country`, or a static degraded insight.
    #[instrument(skip(self))]
    pub async fn country_insight(&self, country: &str) -> Sourced<CountryInsight> {
        let prompt = prompts::country_insight(country);
        let result = self
            .generate(&prompt, &format!("insight:{country}"), self.max_retries)
            .await
            .and_then(|text| parse::<CountryInsight>(&text, Shape::Object));

        match result {
            Ok(insight) => Sourced::Live(insight.clamped()),
            Err(e) => {
                warn!(error = %e, "Serving fallback country insight");
                Sourced::Fallback(CountryInsight::fallback(country))
            }
        }
    }

    // == Travel Recommendations ==
    /// Up to ten must-visit places in `country`; empty on failure.
    ///
    /// Elements that do not match the place shape are skipped.
    #[instrument(skip(self))]
    pub async fn travel_recommendations(&self, country: &str) -> Sourced<Vec<PlaceRecommendation>> {
        let prompt = prompts::travel_recommendations(country);
        let result = self
            .generate(&prompt, &format!("places:{country}"), self.max_retries)
            .await
            .and_then(|text| parse::<Vec<Value>>(&text, Shape::Array))
            .and_then(|raw| {
                let places = valid_places(raw);
                if places.is_empty() {
                    Err(AtlasError::MalformedResponse(
                        "no well-formed places in response".to_string(),
                    ))
                } else {
                    Ok(places)
                }
            });

        match result {
            Ok(places) => Sourced::Live(places),
            Err(e) => {
                warn!(error = %e, "Serving empty recommendations");
                Sourced::Fallback(Vec::new())
            }
        }
    }

    // == Search ==
    /// Up to five entries of `candidates` ranked for `query`.
    ///
    /// Falls back to a case-insensitive substring filter whenever the model's
    /// answer is unusable, so a result list is always produced.
    #[instrument(skip(self, candidates), fields(candidates = candidates.len()))]
    pub async fn search(&self, query: &str, candidates: &[String]) -> Sourced<Vec<String>> {
        let prompt = prompts::search(query, candidates);
        let result = self
            .generate(&prompt, &search_key(query, candidates), INTERACTIVE_MAX_RETRIES)
            .await
            .and_then(|text| parse::<Vec<Value>>(&text, Shape::Array))
            .and_then(|ranked| {
                let matched = known_candidates(&ranked, candidates);
                if matched.is_empty() {
                    Err(AtlasError::MalformedResponse(
                        "ranking named no known candidate".to_string(),
                    ))
                } else {
                    Ok(matched)
                }
            });

        match result {
            Ok(matched) => Sourced::Live(matched),
            Err(e) => {
                debug!(error = %e, "Falling back to substring search");
                Sourced::Fallback(substring_search(query, candidates))
            }
        }
    }

    // == Analyze Interactions ==
    /// Model reading of an interaction history.
    ///
    /// Returns `None` for an empty history or when generation or parsing
    /// fails; no placeholder analysis is made up.
    #[instrument(skip(self, history), fields(interactions = history.len()))]
    pub async fn analyze_interactions(&self, history: &[Interaction]) -> Option<InteractionAnalysis> {
        let summary = summarize(history)?;
        let summary_json = prompts::summary_json(&summary);
        let prompt = prompts::interaction_analysis(&summary_json);
        let cache_key = format!("analysis:{summary_json}");

        match self
            .generate(&prompt, &cache_key, INTERACTIVE_MAX_RETRIES)
            .await
            .and_then(|text| parse::<InteractionAnalysis>(&text, Shape::Object))
        {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                warn!(error = %e, "Interaction analysis unavailable");
                None
            }
        }
    }

    // == Cache Management ==
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
        info!("Enrichment cache cleared");
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }
}

// == Helpers ==
/// Slot of one ranking; the answer depends on the candidate list too.
fn search_key(query: &str, candidates: &[String]) -> String {
    format!("search:{query}:{}", candidates.join("|"))
}

fn parse<T: DeserializeOwned>(text: &str, shape: Shape) -> Result<T> {
    parser::extract(text, shape).ok_or_else(|| {
        AtlasError::MalformedResponse(format!("expected JSON {shape:?} in generated text"))
    })
}

fn valid_places(raw: Vec<Value>) -> Vec<PlaceRecommendation> {
    raw.into_iter()
        .filter_map(|item| serde_json::from_value::<PlaceRecommendation>(item).ok())
        .map(|mut place| {
            place.description = truncate_chars(&place.description, MAX_DESCRIPTION_CHARS);
            place
        })
        .take(MAX_RECOMMENDATIONS)
        .collect()
}

/// Maps ranked names back to candidate spelling, dropping unknowns and repeats.
fn known_candidates(ranked: &[Value], candidates: &[String]) -> Vec<String> {
    let mut matched: Vec<String> = Vec::new();
    for name in ranked.iter().filter_map(Value::as_str) {
        let found = candidates
            .iter()
            .find(|c| c.eq_ignore_ascii_case(name.trim()));
        if let Some(candidate) = found {
            if !matched.contains(candidate) {
                matched.push(candidate.clone());
            }
        }
        if matched.len() == MAX_SEARCH_RESULTS {
            break;
        }
    }
    matched
}

/// Case-insensitive substring filter over `candidates`, in input order.
pub fn substring_search(query: &str, candidates: &[String]) -> Vec<String> {
    let needle = query.to_lowercase();
    candidates
        .iter()
        .filter(|c| c.to_lowercase().contains(&needle))
        .take(MAX_SEARCH_RESULTS)
        .cloned()
        .collect()
}

/// Summary statistics over `history`, or `None` when it is empty.
///
/// Ties for most visited go to the country seen first. Missing durations
/// count as zero.
pub fn summarize(history: &[Interaction]) -> Option<InteractionSummary> {
    if history.is_empty() {
        return None;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for interaction in history {
        let count = counts.entry(interaction.country.as_str()).or_insert(0);
        if *count == 0 {
            order.push(interaction.country.as_str());
        }
        *count += 1;
    }

    let mut most_visited = order[0];
    for &country in &order[1..] {
        if counts[country] > counts[most_visited] {
            most_visited = country;
        }
    }

    let total_duration: u64 = history.iter().map(|i| i.duration_ms.unwrap_or(0)).sum();

    Some(InteractionSummary {
        total_hovers: history.len(),
        unique_countries: order.len(),
        most_visited: most_visited.to_string(),
        avg_duration: total_duration as f64 / history.len() as f64,
    })
}
