//! Request DTOs for the HTTP API

use serde::Deserialize;

use crate::enrichment::Interaction;

/// Longest accepted search query, in characters
const MAX_QUERY_CHARS: usize = 200;

/// Request body for POST /search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Country names the result may be drawn from
    #[serde(default)]
    pub candidates: Vec<String>,
}

impl SearchRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.query.trim().is_empty() {
            return Some("Query cannot be empty".to_string());
        }
        if self.query.chars().count() > MAX_QUERY_CHARS {
            return Some(format!(
                "Query exceeds maximum length of {MAX_QUERY_CHARS} characters"
            ));
        }
        None
    }
}

/// Request body for POST /interactions/analyze
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub history: Vec<Interaction>,
}
