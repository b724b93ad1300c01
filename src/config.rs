//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default generative model name
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
/// Default generative API base URL
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default live flight feed base URL
pub const DEFAULT_FLIGHT_API_URL: &str = "https://api.aviationstack.com/v1";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Credentials are optional: a missing key switches the matching client to its
/// fallback mode for the whole process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    /// Generative model credential
    pub gemini_api_key: Option<String>,
    /// Generative model name
    pub gemini_model: String,
    /// Generative API base URL
    pub gemini_api_url: String,
    /// TTL in milliseconds for generated text
    pub ai_cache_ttl_ms: u64,
    /// Backoff unit in milliseconds (attempt N waits N units)
    pub ai_retry_unit_ms: u64,
    /// Extra attempts after the first failed generation
    pub ai_max_retries: u32,
    /// Flight feed credential
    pub flight_api_key: Option<String>,
    /// Flight feed base URL
    pub flight_api_url: String,
    /// TTL in milliseconds for flight data
    pub flight_cache_ttl_ms: u64,
    /// Interval in milliseconds between polling ticks
    pub poll_interval_ms: u64,
    /// Timeout in milliseconds for outbound HTTP requests
    pub http_timeout_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `GEMINI_API_KEY` - Generative model credential (default: none)
    /// - `GEMINI_MODEL` - Model name (default: gemini-2.5-flash)
    /// - `GEMINI_API_URL` - Generative API base URL
    /// - `AI_CACHE_TTL_MS` - Generated text TTL (default: 3600000)
    /// - `AI_RETRY_UNIT_MS` - Retry backoff unit (default: 1000)
    /// - `AI_MAX_RETRIES` - Extra generation attempts (default: 2)
    /// - `FLIGHT_API_KEY` - Flight feed credential (default: none)
    /// - `FLIGHT_API_URL` - Flight feed base URL
    /// - `FLIGHT_CACHE_TTL_MS` - Flight data TTL (default: 30000)
    /// - `POLL_INTERVAL_MS` - Polling interval (default: 5000)
    /// - `HTTP_TIMEOUT_MS` - Outbound request timeout (default: 10000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gemini_api_key: credential("GEMINI_API_KEY"),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_api_url: env::var("GEMINI_API_URL").unwrap_or(defaults.gemini_api_url),
            ai_cache_ttl_ms: parsed("AI_CACHE_TTL_MS").unwrap_or(defaults.ai_cache_ttl_ms),
            ai_retry_unit_ms: parsed("AI_RETRY_UNIT_MS").unwrap_or(defaults.ai_retry_unit_ms),
            ai_max_retries: parsed("AI_MAX_RETRIES").unwrap_or(defaults.ai_max_retries),
            flight_api_key: credential("FLIGHT_API_KEY"),
            flight_api_url: env::var("FLIGHT_API_URL").unwrap_or(defaults.flight_api_url),
            flight_cache_ttl_ms: parsed("FLIGHT_CACHE_TTL_MS")
                .unwrap_or(defaults.flight_cache_ttl_ms),
            poll_interval_ms: parsed("POLL_INTERVAL_MS").unwrap_or(defaults.poll_interval_ms),
            http_timeout_ms: parsed("HTTP_TIMEOUT_MS").unwrap_or(defaults.http_timeout_ms),
            server_port: parsed("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    pub fn ai_cache_ttl(&self) -> Duration {
        Duration::from_millis(self.ai_cache_ttl_ms)
    }

    pub fn ai_retry_unit(&self) -> Duration {
        Duration::from_millis(self.ai_retry_unit_ms)
    }

    pub fn flight_cache_ttl(&self) -> Duration {
        Duration::from_millis(self.flight_cache_ttl_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_url: DEFAULT_GEMINI_API_URL.to_string(),
            ai_cache_ttl_ms: 3_600_000,
            ai_retry_unit_ms: 1000,
            ai_max_retries: 2,
            flight_api_key: None,
            flight_api_url: DEFAULT_FLIGHT_API_URL.to_string(),
            flight_cache_ttl_ms: 30_000,
            poll_interval_ms: 5000,
            http_timeout_ms: 10_000,
            server_port: 3000,
        }
    }
}

fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Blank credentials are treated the same as missing ones.
fn credential(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.gemini_api_key.is_none());
        assert!(config.flight_api_key.is_none());
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.ai_cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.flight_cache_ttl(), Duration::from_secs(30));
        assert_eq!(config.ai_max_retries, 2);
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("AI_CACHE_TTL_MS");
        env::remove_var("FLIGHT_CACHE_TTL_MS");
        env::remove_var("POLL_INTERVAL_MS");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.ai_cache_ttl_ms, 3_600_000);
        assert_eq!(config.flight_cache_ttl_ms, 30_000);
        assert_eq!(config.poll_interval_ms, 5000);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_blank_credential_is_absent() {
        env::set_var("GEO_INSIGHTS_TEST_BLANK_KEY", "   ");
        assert!(credential("GEO_INSIGHTS_TEST_BLANK_KEY").is_none());

        env::set_var("GEO_INSIGHTS_TEST_BLANK_KEY", " abc ");
        assert_eq!(
            credential("GEO_INSIGHTS_TEST_BLANK_KEY"),
            Some("abc".to_string())
        );
        env::remove_var("GEO_INSIGHTS_TEST_BLANK_KEY");
    }
}
