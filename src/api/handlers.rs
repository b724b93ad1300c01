//! API Handlers
//!
//! HTTP request handlers for each endpoint. Client operations never fail, so
//! most handlers are infallible; errors come only from request validation
//! and unknown flights.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::watch;
use tracing::info;

use crate::config::Config;
use crate::enrichment::{
    CountryInsight, EnrichmentClient, EnrichmentConfig, PlaceRecommendation,
};
use crate::error::{AtlasError, Result};
use crate::feed::{AviationStackFeed, FeedConfig, FeedSource, LiveEntity, LiveFeedClient, Snapshot};
use crate::models::{AnalyzeRequest, FlightsResponse, HealthResponse, SearchRequest, StatsResponse};
use crate::provider::{GeminiProvider, InsightProvider};
use crate::sourced::Sourced;

/// Application state shared across all handlers.
///
/// Both clients own their caches; `latest` holds the most recent snapshot
/// delivered by the polling subscription.
#[derive(Clone)]
pub struct AppState {
    pub enrichment: Arc<EnrichmentClient>,
    pub feed: Arc<LiveFeedClient>,
    latest: Arc<watch::Sender<Option<Snapshot>>>,
}

impl AppState {
    pub fn new(enrichment: EnrichmentClient, feed: LiveFeedClient) -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            enrichment: Arc::new(enrichment),
            feed: Arc::new(feed),
            latest: Arc::new(latest),
        }
    }

    /// Creates the clients from configuration.
    ///
    /// A missing credential leaves the matching client in fallback mode; only
    /// a failure to build an HTTP client is an error.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider: Option<Arc<dyn InsightProvider>> = match &config.gemini_api_key {
            Some(key) => {
                let gemini = GeminiProvider::new(
                    config.gemini_api_url.clone(),
                    key.clone(),
                    config.gemini_model.clone(),
                    config.http_timeout(),
                )
                .map_err(|e| AtlasError::ProviderUnavailable(e.to_string()))?;
                info!(model = gemini.model(), "Generative provider configured");
                Some(Arc::new(gemini))
            }
            None => None,
        };

        let source: Option<Arc<dyn FeedSource>> = match &config.flight_api_key {
            Some(key) => Some(Arc::new(AviationStackFeed::new(
                config.flight_api_url.clone(),
                key.clone(),
                config.http_timeout(),
            )?)),
            None => None,
        };

        Ok(Self::new(
            EnrichmentClient::new(provider, EnrichmentConfig::from(config)),
            LiveFeedClient::new(source, FeedConfig::from(config)),
        ))
    }

    /// Starts the feed subscription that keeps `latest` current.
    pub fn start_polling(&self, interval: Duration) {
        let latest = Arc::clone(&self.latest);
        self.feed.start_polling(
            move |snapshot: Snapshot| {
                latest.send_replace(Some(snapshot));
            },
            interval,
        );
    }

    pub fn stop_polling(&self) {
        self.feed.stop_polling();
        info!("Polling subscription released");
    }

    /// Receiver that observes every polled snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Option<Snapshot>> {
        self.latest.subscribe()
    }

    fn latest_snapshot(&self) -> Option<Snapshot> {
        self.latest.borrow().clone()
    }
}

/// Handler for GET /countries/:name/insight
pub async fn insight_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<Sourced<CountryInsight>> {
    Json(state.enrichment.country_insight(&name).await)
}

/// Handler for GET /countries/:name/recommendations
pub async fn recommendations_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<Sourced<Vec<PlaceRecommendation>>> {
    Json(state.enrichment.travel_recommendations(&name).await)
}

/// Handler for POST /search
pub async fn search_handler(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<Sourced<Vec<String>>>> {
    if let Some(error_msg) = req.validate() {
        return Err(AtlasError::InvalidRequest(error_msg));
    }

    Ok(Json(
        state.enrichment.search(req.query.trim(), &req.candidates).await,
    ))
}

/// Handler for POST /interactions/analyze
///
/// 204 when there is nothing to analyze or no analysis could be produced.
pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    match state.enrichment.analyze_interactions(&req.history).await {
        Some(analysis) => Json(analysis).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Handler for GET /flights
pub async fn flights_handler(State(state): State<AppState>) -> Json<FlightsResponse> {
    Json(state.feed.fetch_snapshot().await.into())
}

/// Handler for GET /flights/latest
///
/// 204 until the polling subscription has delivered its first snapshot.
pub async fn latest_flights_handler(State(state): State<AppState>) -> Response {
    match state.latest_snapshot() {
        Some(snapshot) => Json(FlightsResponse::from(snapshot)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Handler for GET /flights/:id
pub async fn flight_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LiveEntity>> {
    state
        .feed
        .fetch_entity_detail(&id)
        .await
        .map(Json)
        .ok_or_else(|| AtlasError::NotFound(format!("Flight '{id}' not found")))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.enrichment.cache_stats().await,
        state.feed.cache_stats().await,
        state.feed.is_polling(),
    ))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.enrichment.is_available(),
        state.feed.has_source(),
    ))
}
