//! Gemini generateContent adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, instrument};

use super::InsightProvider;
use crate::error::ProviderError;

/// [`InsightProvider`] backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    /// Builds a provider with its own HTTP client.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transient(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }
}

#[async_trait]
impl InsightProvider for GeminiProvider {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload = json!({
            "contents": [
                { "role": "user", "parts": [{ "text": prompt }] }
            ]
        });

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::Transient(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, body));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Transient(format!("invalid response body: {e}")))?;
        let text = extract_candidate_text(&body)?;
        debug!(chars = text.len(), "Generated text received");
        Ok(text)
    }
}

fn classify_status(status: StatusCode, body: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::Auth(format!("HTTP {}: {}", status.as_u16(), body))
        }
        _ => ProviderError::Transient(format!("HTTP {}: {}", status.as_u16(), body)),
    }
}

/// Concatenates the text parts of the first candidate.
fn extract_candidate_text(body: &Value) -> Result<String, ProviderError> {
    let parts = body
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::Transient("response has no candidate content".into()))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(ProviderError::Transient("candidate content has no text".into()));
    }
    Ok(text)
}
