//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle for each endpoint against stub
//! upstreams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use geo_insights::{
    api::create_router,
    enrichment::{EnrichmentClient, EnrichmentConfig},
    error::{AtlasError, ProviderError},
    feed::{route_count, FeedConfig, FeedSource, GeoPoint, LiveEntity, LiveFeedClient},
    provider::InsightProvider,
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;

// == Stub Upstreams ==

/// Provider that always answers with the same reply.
struct FixedProvider {
    reply: Result<String, ProviderError>,
    calls: AtomicUsize,
}

impl FixedProvider {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: Err(ProviderError::Transient("quota exceeded".to_string())),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InsightProvider for FixedProvider {
    async fn generate_text(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

/// Feed with one airborne flight, or none at all when `down`.
struct StubFeed {
    down: bool,
}

fn flight(id: &str) -> LiveEntity {
    LiveEntity {
        id: id.to_string(),
        label: id.to_string(),
        airline: "British Airways".to_string(),
        position: GeoPoint::new(-30.2, 50.1),
        altitude: 11_000.0,
        speed: 870.0,
        heading: 65.0,
        origin_key: "JFK".to_string(),
        destination_key: "LHR".to_string(),
        route_path: vec![GeoPoint::new(-73.7781, 40.6413), GeoPoint::new(-30.2, 50.1)],
    }
}

#[async_trait]
impl FeedSource for StubFeed {
    async fn fetch_active(&self) -> geo_insights::error::Result<Vec<LiveEntity>> {
        if self.down {
            return Err(AtlasError::FeedUnavailable("HTTP 503".to_string()));
        }
        Ok(vec![flight("BA117")])
    }

    async fn fetch_entity(&self, id: &str) -> geo_insights::error::Result<Option<LiveEntity>> {
        if self.down {
            return Err(AtlasError::FeedUnavailable("HTTP 503".to_string()));
        }
        Ok((id == "BA117").then(|| flight(id)))
    }
}

// == Helper Functions ==

fn fast_retries() -> EnrichmentConfig {
    EnrichmentConfig {
        retry_unit: Duration::from_millis(1),
        ..EnrichmentConfig::default()
    }
}

fn create_app(provider: Option<Arc<FixedProvider>>, feed: Option<StubFeed>) -> Router {
    let provider = provider.map(|p| p as Arc<dyn InsightProvider>);
    let feed = feed.map(|f| Arc::new(f) as Arc<dyn FeedSource>);
    let state = AppState::new(
        EnrichmentClient::new(provider, fast_retries()),
        LiveFeedClient::new(feed, FeedConfig::default()),
    );
    create_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// == Country Insight Tests ==

#[tokio::test]
async fn test_insight_from_provider_is_live_and_cached() {
    let provider = FixedProvider::replying(
        "Here you go:\n```json\n{\"capital\": \"Tokyo\", \"population\": \"125 million\", \
         \"culturalFact\": \"Tea ceremony\", \"geography\": \"Island nation\"}\n```",
    );
    let app = create_app(Some(provider.clone()), None);

    let response = app.clone().oneshot(get("/countries/Japan/insight")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["source"], "live");
    assert_eq!(json["data"]["capital"], "Tokyo");
    assert_eq!(json["data"]["culturalFact"], "Tea ceremony");

    app.oneshot(get("/countries/Japan/insight")).await.unwrap();
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_insight_after_exhausted_retries_is_fallback() {
    let provider = FixedProvider::failing();
    let app = create_app(Some(provider.clone()), None);

    let response = app.oneshot(get("/countries/Peru/insight")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["source"], "fallback");
    assert_eq!(json["data"]["capital"], "Peru");
    assert_eq!(json["data"]["population"], "Data temporarily unavailable");
    // One call plus two retries
    assert_eq!(provider.calls(), 3);
}

// == Recommendation Tests ==

#[tokio::test]
async fn test_recommendations_are_capped_at_ten() {
    let places: Vec<Value> = (0..12)
        .map(|i| {
            serde_json::json!({
                "name": format!("Place {i}"),
                "description": "Worth the trip",
                "type": "landmark"
            })
        })
        .collect();
    let provider = FixedProvider::replying(&serde_json::to_string(&places).unwrap());
    let app = create_app(Some(provider), None);

    let response = app
        .oneshot(get("/countries/Italy/recommendations"))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["source"], "live");
    assert_eq!(json["data"].as_array().unwrap().len(), 10);
    assert_eq!(json["data"][0]["type"], "landmark");
}

#[tokio::test]
async fn test_recommendations_without_provider_are_empty() {
    let app = create_app(None, None);

    let response = app
        .oneshot(get("/countries/Italy/recommendations"))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["source"], "fallback");
    assert!(json["data"].as_array().unwrap().is_empty());
}

// == Search Tests ==

#[tokio::test]
async fn test_search_keeps_only_known_candidates() {
    let provider = FixedProvider::replying(r#"["Germany", "Atlantis"]"#);
    let app = create_app(Some(provider), None);

    let response = app
        .oneshot(post_json(
            "/search",
            r#"{"query": "beer", "candidates": ["France", "Germany", "Niger"]}"#,
        ))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["source"], "live");
    assert_eq!(json["data"], serde_json::json!(["Germany"]));
}

#[tokio::test]
async fn test_search_without_provider_uses_substring_filter() {
    let app = create_app(None, None);

    let response = app
        .oneshot(post_json(
            "/search",
            r#"{"query": "ger", "candidates": ["France", "Germany"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["source"], "fallback");
    assert_eq!(json["data"], serde_json::json!(["Germany"]));
}

#[tokio::test]
async fn test_search_empty_query_is_bad_request() {
    let app = create_app(None, None);

    let response = app
        .oneshot(post_json("/search", r#"{"query": "", "candidates": []}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_search_missing_query_is_rejected() {
    let app = create_app(None, None);

    let response = app
        .oneshot(post_json("/search", r#"{"candidates": []}"#))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == Interaction Analysis Tests ==

#[tokio::test]
async fn test_analyze_returns_model_reading() {
    let provider = FixedProvider::replying(
        r#"{"insights": ["Drawn to South America"], "suggestions": ["Visit Bolivia"]}"#,
    );
    let app = create_app(Some(provider), None);

    let response = app
        .oneshot(post_json(
            "/interactions/analyze",
            r#"{"history": [{"country": "Peru", "duration": 1200}, {"country": "Chile"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["suggestions"][0], "Visit Bolivia");
}

#[tokio::test]
async fn test_analyze_malformed_reply_is_no_content() {
    let provider = FixedProvider::replying("I could not analyze that.");
    let app = create_app(Some(provider), None);

    let response = app
        .oneshot(post_json(
            "/interactions/analyze",
            r#"{"history": [{"country": "Peru"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_analyze_empty_history_skips_provider() {
    let provider = FixedProvider::replying(r#"{"insights": [], "suggestions": []}"#);
    let app = create_app(Some(provider.clone()), None);

    let response = app
        .oneshot(post_json("/interactions/analyze", r#"{"history": []}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(provider.calls(), 0);
}

// == Flight Tests ==

#[tokio::test]
async fn test_flights_from_feed_are_live() {
    let app = create_app(None, Some(StubFeed { down: false }));

    let response = app.oneshot(get("/flights")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["source"], "live");
    assert_eq!(json["count"], 1);
    assert_eq!(json["flights"][0]["id"], "BA117");
    assert_eq!(json["flights"][0]["originKey"], "JFK");
}

#[tokio::test]
async fn test_flights_with_feed_down_are_synthetic() {
    let app = create_app(None, Some(StubFeed { down: true }));

    let response = app.oneshot(get("/flights")).await.unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["source"], "fallback");
    assert_eq!(json["count"], route_count());
    for flight in json["flights"].as_array().unwrap() {
        let heading = flight["heading"].as_f64().unwrap();
        assert!((0.0..360.0).contains(&heading));
    }
}

#[tokio::test]
async fn test_flight_detail_found_and_missing() {
    let app = create_app(None, Some(StubFeed { down: false }));

    let response = app.clone().oneshot(get("/flights/BA117")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["airline"], "British Airways");

    let response = app.oneshot(get("/flights/XX1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == Stats and Health Tests ==

#[tokio::test]
async fn test_stats_track_both_caches() {
    let provider = FixedProvider::replying(r#"{"capital": "Lima", "population": "34 million", "culturalFact": "Inca heritage", "geography": "Andes"}"#);
    let app = create_app(Some(provider), Some(StubFeed { down: false }));

    for uri in ["/countries/Peru/insight", "/countries/Peru/insight", "/flights"] {
        app.clone().oneshot(get(uri)).await.unwrap();
    }

    let response = app.oneshot(get("/stats")).await.unwrap();
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["enrichment"]["hits"], 1);
    assert_eq!(json["enrichment"]["misses"], 1);
    assert_eq!(json["enrichment"]["total_entries"], 1);
    assert_eq!(json["flight_snapshots"]["misses"], 1);
    assert_eq!(json["polling"], false);
}

#[tokio::test]
async fn test_health_reports_configured_upstreams() {
    let app = create_app(Some(FixedProvider::failing()), None);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["provider_configured"], true);
    assert_eq!(json["feed_configured"], false);
}
