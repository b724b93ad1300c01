//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the service is up.
//!
//! # Tasks
//! - Polling: fetches a value on a fixed interval and hands it to a consumer
//!   callback until the owning subscription is stopped

mod polling;

pub use polling::{spawn_polling_task, PollingSubscription};
