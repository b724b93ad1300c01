//! Polling Task
//!
//! Repeating fetch-and-deliver loop owned by a cancellable subscription.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Shortest accepted polling interval
const MIN_INTERVAL: Duration = Duration::from_millis(1);

// == Polling Subscription ==
/// Handle to a running polling task.
///
/// Dropping the subscription stops the task.
#[derive(Debug)]
pub struct PollingSubscription {
    handle: JoinHandle<()>,
    active: Arc<AtomicBool>,
    interval: Duration,
}

impl PollingSubscription {
    /// Stops the task. No delivery happens after this returns, even when
    /// called from inside the callback; a fetch already in flight is dropped.
    pub fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.handle.abort();
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst) && !self.handle.is_finished()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for PollingSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawns a task that delivers `fetch()` to `callback` immediately and then
/// once per `interval`.
///
/// Each delivery finishes before the next fetch starts, so the consumer never
/// sees overlapping or reordered values. Late ticks are delayed rather than
/// bunched. Intervals shorter than 1ms are raised to 1ms.
///
/// # Example
/// ```ignore
/// let subscription = spawn_polling_task(
///     move || { let feed = feed.clone(); async move { feed.fetch_snapshot().await } },
///     Arc::new(|snapshot| println!("{} flights", snapshot.value().len())),
///     Duration::from_secs(5),
/// );
/// // Later:
/// subscription.stop();
/// ```
pub fn spawn_polling_task<T, F, Fut>(
    fetch: F,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    interval: Duration,
) -> PollingSubscription
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    let interval = interval.max(MIN_INTERVAL);
    let active = Arc::new(AtomicBool::new(true));
    let task_active = Arc::clone(&active);

    let handle = tokio::spawn(async move {
        info!("Starting polling task with interval of {:?}", interval);

        let mut ticker = interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut deliveries: u64 = 0;
        loop {
            let value = fetch().await;
            if !task_active.load(Ordering::SeqCst) {
                break;
            }
            callback(value);
            deliveries += 1;
            debug!(deliveries, "Polling tick delivered");

            ticker.tick().await;
            if !task_active.load(Ordering::SeqCst) {
                break;
            }
        }

        debug!(deliveries, "Polling task stopped");
    });

    PollingSubscription {
        handle,
        active,
        interval,
    }
}
