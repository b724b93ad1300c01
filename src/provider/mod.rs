//! Provider Module
//!
//! Abstraction over the remote generative-text backend. The enrichment client
//! only sees the [`InsightProvider`] trait, so tests substitute scripted fakes.

mod gemini;

pub use gemini::GeminiProvider;

use async_trait::async_trait;

use crate::error::ProviderError;

// == Insight Provider Trait ==
/// Remote generative-text backend.
///
/// Implementations are latent and fallible; callers own retry policy.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Generates free-form text for `prompt`.
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError>;
}
