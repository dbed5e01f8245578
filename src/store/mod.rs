//! Persistence for the singleton counter row.
//!
//! [`CounterStore`] is the only path to durable state. The service never caches
//! rows between requests; every operation goes through one of these calls.

mod memory;
mod postgres;

pub use memory::MemoryCounterStore;
pub use postgres::{ensure_database_exists, PgCounterStore, COUNTERS_TABLE};

use crate::error::StoreError;
use crate::model::Counter;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Store clock and engine version, reported by `GET /api/db/test`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    #[serde(serialize_with = "crate::model::serialize_timestamp")]
    pub current_time: DateTime<Utc>,
    pub store_version: String,
}

#[async_trait]
pub trait CounterStore: Send + Sync {
    /// The singleton row, or `None` before first access.
    async fn find_singleton(&self) -> Result<Option<Counter>, StoreError>;

    /// Insert the singleton with `initial`. `None` when the row already exists.
    async fn create(&self, initial: i32) -> Result<Option<Counter>, StoreError>;

    /// Overwrite the value and refresh `updated_at` together. `None` when no row exists.
    async fn update_value(&self, value: i32) -> Result<Option<Counter>, StoreError>;

    /// Create with 1 or add 1, as a single atomic step.
    async fn increment(&self) -> Result<Counter, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    async fn diagnostics(&self) -> Result<StoreInfo, StoreError>;
}
