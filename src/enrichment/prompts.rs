//! Prompt templates. Each has one substitution point for the entity key,
//! except search and analysis which embed their computed inputs.

use super::types::InteractionSummary;

/// Candidates embedded in a search prompt
pub const SEARCH_PROMPT_CANDIDATES: usize = 50;

pub fn country_insight(country: &str) -> String {
    format!(
        r#"You are a travel expert. Provide brief AI insights about {country}.

Return ONLY valid JSON (no markdown, no code blocks) with this exact structure:
{{
  "population": "actual population with capital city name",
  "capital": "capital city name only",
  "culturalFact": "one fascinating cultural or historical fact (max 80 chars)",
  "geography": "one interesting geographical feature (max 80 chars)"
}}

Be specific, engaging, and concise."#
    )
}

pub fn travel_recommendations(country: &str) -> String {
    format!(
        r#"You are a top travel expert. List the TOP 10 MUST-VISIT places in {country} for travelers.

Return ONLY valid JSON array (no markdown, no code blocks):
[
  {{
    "name": "place name",
    "description": "why visit (max 70 chars)",
    "type": "landmark" or "nature" or "cultural"
  }}
]

Be specific with actual place names. Make descriptions exciting and brief."#
    )
}

pub fn search(query: &str, candidates: &[String]) -> String {
    let listed: Vec<&str> = candidates
        .iter()
        .take(SEARCH_PROMPT_CANDIDATES)
        .map(String::as_str)
        .collect();
    format!(
        r#"Given this search query: "{query}" and this list of countries: {}
Return the top 5 most relevant country names as a JSON array. Consider:
- Direct name matches
- Regional references
- Cultural keywords
- Geographic features
Only return country names that exist in the provided list."#,
        listed.join(", ")
    )
}

pub fn interaction_analysis(summary_json: &str) -> String {
    format!(
        r#"Analyze this user interaction data: {summary_json}
Provide 2-3 insights about user interests and suggest 2 countries they might enjoy exploring.
Return as JSON: {{ "insights": [string array], "suggestions": [country names] }}"#
    )
}

/// Serializes a summary for embedding in [`interaction_analysis`].
pub fn summary_json(summary: &InteractionSummary) -> String {
    serde_json::to_string(summary).unwrap_or_default()
}
