//! Enrichment result types.

use serde::{Deserialize, Serialize};

/// Maximum characters of a cultural or geography fact
pub const MAX_FACT_CHARS: usize = 80;
/// Maximum characters of a place description
pub const MAX_DESCRIPTION_CHARS: usize = 70;
/// Maximum number of recommended places
pub const MAX_RECOMMENDATIONS: usize = 10;
/// Maximum number of search results
pub const MAX_SEARCH_RESULTS: usize = 5;

// == Country Insight ==
/// Short structured facts about a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryInsight {
    pub capital: String,
    #[serde(rename = "population", alias = "populationSummary")]
    pub population_summary: String,
    pub cultural_fact: String,
    pub geography: String,
}

impl CountryInsight {
    /// Static degraded insight used when generation fails.
    pub fn fallback(country: &str) -> Self {
        Self {
            capital: country.to_string(),
            population_summary: "Data temporarily unavailable".to_string(),
            cultural_fact: "Fascinating history and culture".to_string(),
            geography: "Beautiful landscapes and landmarks".to_string(),
        }
    }

    /// Enforces the length contract on free-text fields.
    pub(crate) fn clamped(mut self) -> Self {
        self.cultural_fact = truncate_chars(&self.cultural_fact, MAX_FACT_CHARS);
        self.geography = truncate_chars(&self.geography, MAX_FACT_CHARS);
        self
    }
}

// == Place Recommendation ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Landmark,
    Nature,
    Cultural,
}

/// One must-visit place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecommendation {
    pub name: String,
    pub description: String,
    #[serde(rename = "type", alias = "category")]
    pub category: PlaceCategory,
}

// == Interaction Analysis ==
/// One hover/visit recorded by the map front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub country: String,
    #[serde(default, alias = "duration")]
    pub duration_ms: Option<u64>,
}

/// Locally computed statistics over an interaction history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionSummary {
    pub total_hovers: usize,
    pub unique_countries: usize,
    pub most_visited: String,
    pub avg_duration: f64,
}

/// Model-generated reading of an interaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionAnalysis {
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Truncates to at most `max` characters on a char boundary.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
