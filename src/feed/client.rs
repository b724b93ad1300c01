//! Live Feed Client
//!
//! Bounded-age cache of flight positions over an optional [`FeedSource`],
//! with a synthetic fallback and a single polling subscription.
//!
//! States: idle until `start_polling`, polling until `stop_polling` (or drop).
//! There is no error state; every fetch failure ends in the fallback path.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::mock;
use super::source::FeedSource;
use super::types::{FeedCacheStats, LiveEntity, Snapshot};
use crate::cache::TtlCache;
use crate::config::Config;
use crate::sourced::Sourced;
use crate::tasks::{spawn_polling_task, PollingSubscription};

/// Cache slot of the all-flights snapshot
const SNAPSHOT_KEY: &str = "flights:all";

// == Feed Config ==
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Lifetime of real feed data in the cache
    pub cache_ttl: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(30),
        }
    }
}

impl From<&Config> for FeedConfig {
    fn from(config: &Config) -> Self {
        Self {
            cache_ttl: config.flight_cache_ttl(),
        }
    }
}

// == Feed State ==
/// Fetch path shared with the polling task.
struct FeedState {
    /// `None` when no credential is configured: synthetic data only
    source: Option<Arc<dyn FeedSource>>,
    snapshots: RwLock<TtlCache<String, Vec<LiveEntity>>>,
    details: RwLock<TtlCache<String, LiveEntity>>,
}

impl FeedState {
    async fn fetch_snapshot(&self) -> Snapshot {
        let key = SNAPSHOT_KEY.to_string();
        if let Some(cached) = self.snapshots.write().await.get(&key) {
            debug!(flights = cached.len(), "Using cached flight snapshot");
            return Sourced::Live(cached);
        }

        let Some(source) = &self.source else {
            debug!("No feed credential; serving synthetic flights");
            return Sourced::Fallback(mock::synthetic_snapshot(&mut rand::thread_rng()));
        };

        match source.fetch_active().await {
            Ok(flights) => {
                info!(flights = flights.len(), "Loaded live flights");
                self.snapshots.write().await.set(key, flights.clone());
                Sourced::Live(flights)
            }
            Err(e) => {
                warn!(error = %e, "Feed unavailable; serving synthetic flights");
                Sourced::Fallback(mock::synthetic_snapshot(&mut rand::thread_rng()))
            }
        }
    }

    async fn fetch_entity_detail(&self, id: &str) -> Option<LiveEntity> {
        let source = self.source.as_ref()?;

        let key = format!("flight:{id}");
        if let Some(cached) = self.details.write().await.get(&key) {
            debug!("Using cached flight detail");
            return Some(cached);
        }

        match source.fetch_entity(id).await {
            Ok(Some(flight)) => {
                self.details.write().await.set(key, flight.clone());
                Some(flight)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Flight detail unavailable");
                None
            }
        }
    }
}

// == Live Feed Client ==
pub struct LiveFeedClient {
    state: Arc<FeedState>,
    /// At most one polling task per client
    subscription: Mutex<Option<PollingSubscription>>,
}

impl LiveFeedClient {
    pub fn new(source: Option<Arc<dyn FeedSource>>, config: FeedConfig) -> Self {
        if source.is_none() {
            warn!("Flight feed credential not configured; using synthetic flights");
        }
        Self {
            state: Arc::new(FeedState {
                source,
                snapshots: RwLock::new(TtlCache::new(config.cache_ttl)),
                details: RwLock::new(TtlCache::new(config.cache_ttl)),
            }),
            subscription: Mutex::new(None),
        }
    }

    pub fn has_source(&self) -> bool {
        self.state.source.is_some()
    }

    // == Fetch Snapshot ==
    /// Current flights. Never fails: cached or fresh feed data is `Live`,
    /// anything else is a synthetic `Fallback` (not cached).
    #[instrument(skip(self))]
    pub async fn fetch_snapshot(&self) -> Snapshot {
        self.state.fetch_snapshot().await
    }

    // == Fetch Entity Detail ==
    /// One flight by id. `None` when the feed is absent or failing; a made-up
    /// detail for a flight the user picked would be misleading.
    #[instrument(skip(self))]
    pub async fn fetch_entity_detail(&self, id: &str) -> Option<LiveEntity> {
        self.state.fetch_entity_detail(id).await
    }

    // == Polling ==
    /// Replaces any running subscription with one that delivers a snapshot
    /// now and then every `interval`.
    ///
    /// The callback runs on a tokio task and must not panic; a panic ends the
    /// subscription. Must be called from within a tokio runtime.
    pub fn start_polling<F>(&self, callback: F, interval: Duration)
    where
        F: Fn(Snapshot) + Send + Sync + 'static,
    {
        let mut slot = self.lock_subscription();
        if let Some(previous) = slot.take() {
            previous.stop();
            debug!("Replaced existing polling subscription");
        }

        let state = Arc::clone(&self.state);
        let fetch = move || {
            let state = Arc::clone(&state);
            async move { state.fetch_snapshot().await }
        };
        let subscription = spawn_polling_task(fetch, Arc::new(callback), interval);
        info!(
            interval_ms = subscription.interval().as_millis() as u64,
            "Flight polling started"
        );
        *slot = Some(subscription);
    }

    /// Stops polling. Idempotent; safe to call from inside the callback.
    pub fn stop_polling(&self) {
        if let Some(subscription) = self.lock_subscription().take() {
            subscription.stop();
            info!("Flight polling stopped");
        }
    }

    pub fn is_polling(&self) -> bool {
        self.lock_subscription()
            .as_ref()
            .is_some_and(PollingSubscription::is_active)
    }

    // == Cache Management ==
    pub async fn clear_cache(&self) {
        self.state.snapshots.write().await.clear();
        self.state.details.write().await.clear();
    }

    pub async fn cache_stats(&self) -> FeedCacheStats {
        FeedCacheStats {
            snapshots: self.state.snapshots.read().await.stats(),
            details: self.state.details.read().await.stats(),
        }
    }

    fn lock_subscription(&self) -> MutexGuard<'_, Option<PollingSubscription>> {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for LiveFeedClient {
    fn drop(&mut self) {
        self.stop_polling();
    }
}
