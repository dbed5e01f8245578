//! In-process counter store. Same contract as the PostgreSQL store, one mutex around the row.

use super::{CounterStore, StoreInfo};
use crate::error::StoreError;
use crate::model::{Counter, COUNTER_ID, MAX_COUNTER_VALUE};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct MemoryCounterStore {
    row: Mutex<Option<Counter>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `value`, as if created earlier.
    pub fn with_value(value: i32) -> Self {
        let now = Utc::now();
        Self {
            row: Mutex::new(Some(Counter {
                id: COUNTER_ID,
                value,
                created_at: now,
                updated_at: now,
            })),
        }
    }
}

fn check_range(value: i32) -> Result<i32, StoreError> {
    if (0..=MAX_COUNTER_VALUE).contains(&value) {
        Ok(value)
    } else {
        Err(StoreError::OutOfRange)
    }
}

fn new_row(value: i32) -> Counter {
    let now = Utc::now();
    Counter {
        id: COUNTER_ID,
        value,
        created_at: now,
        updated_at: now,
    }
}

fn touch(row: &mut Counter, value: i32) {
    row.value = value;
    row.updated_at = Utc::now().max(row.created_at);
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn find_singleton(&self) -> Result<Option<Counter>, StoreError> {
        Ok(self.row.lock().await.clone())
    }

    async fn create(&self, initial: i32) -> Result<Option<Counter>, StoreError> {
        let initial = check_range(initial)?;
        let mut guard = self.row.lock().await;
        if guard.is_some() {
            return Ok(None);
        }
        let row = new_row(initial);
        *guard = Some(row.clone());
        Ok(Some(row))
    }

    async fn update_value(&self, value: i32) -> Result<Option<Counter>, StoreError> {
        let value = check_range(value)?;
        let mut guard = self.row.lock().await;
        Ok(guard.as_mut().map(|row| {
            touch(row, value);
            row.clone()
        }))
    }

    async fn increment(&self) -> Result<Counter, StoreError> {
        let mut guard = self.row.lock().await;
        if let Some(row) = guard.as_mut() {
            let next = row.value.checked_add(1).ok_or(StoreError::OutOfRange)?;
            touch(row, next);
            return Ok(row.clone());
        }
        let row = new_row(1);
        *guard = Some(row.clone());
        Ok(row)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn diagnostics(&self) -> Result<StoreInfo, StoreError> {
        Ok(StoreInfo {
            current_time: Utc::now(),
            store_version: "memory".into(),
        })
    }
}
