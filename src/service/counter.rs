//! Counter operations against the store. Holds no state of its own between requests.

use crate::error::{AppError, StoreError};
use crate::model::Counter;
use crate::store::CounterStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct CounterService {
    store: Arc<dyn CounterStore>,
}

impl CounterService {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn CounterStore> {
        &self.store
    }

    /// Current row; created with 0 on first access.
    pub async fn get(&self) -> Result<Counter, AppError> {
        if let Some(c) = self.store.find_singleton().await? {
            return Ok(c);
        }
        match self.store.create(0).await? {
            Some(c) => {
                tracing::info!("counter created");
                Ok(c)
            }
            // Lost the creation race; the winner's row is there now.
            None => Ok(self.store.find_singleton().await?.ok_or(StoreError::Missing)?),
        }
    }

    /// Adds 1, or creates the row with 1.
    pub async fn increment(&self) -> Result<Counter, AppError> {
        Ok(self.store.increment().await?)
    }

    pub async fn reset(&self) -> Result<Counter, AppError> {
        self.write(0).await
    }

    /// `value` must already be validated (see [`validate_set_request`](super::validate_set_request)).
    pub async fn set(&self, value: i32) -> Result<Counter, AppError> {
        self.write(value).await
    }

    /// Update, else create, else update again if another request created the row in between.
    async fn write(&self, value: i32) -> Result<Counter, AppError> {
        if let Some(c) = self.store.update_value(value).await? {
            return Ok(c);
        }
        if let Some(c) = self.store.create(value).await? {
            tracing::info!(value, "counter created");
            return Ok(c);
        }
        Ok(self.store.update_value(value).await?.ok_or(StoreError::Missing)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCounterStore;

    fn service() -> CounterService {
        CounterService::new(Arc::new(MemoryCounterStore::new()))
    }

    #[tokio::test]
    async fn get_creates_zero_once() {
        let svc = service();
        let first = svc.get().await.unwrap();
        assert_eq!(first.value, 0);
        let second = svc.get().await.unwrap();
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn increment_on_empty_store_starts_at_one() {
        let svc = service();
        assert_eq!(svc.increment().await.unwrap().value, 1);
        assert_eq!(svc.increment().await.unwrap().value, 2);
    }

    #[tokio::test]
    async fn reset_and_set_on_empty_store_create_the_row() {
        let svc = service();
        assert_eq!(svc.reset().await.unwrap().value, 0);

        let svc = service();
        let c = svc.set(42).await.unwrap();
        assert_eq!(c.value, 42);
        assert_eq!(c.created_at, c.updated_at);
    }

    #[tokio::test]
    async fn scenario_get_increment_set_reset() {
        let svc = service();
        assert_eq!(svc.get().await.unwrap().value, 0);
        assert_eq!(svc.increment().await.unwrap().value, 1);
        assert_eq!(svc.increment().await.unwrap().value, 2);
        assert_eq!(svc.set(10).await.unwrap().value, 10);
        assert_eq!(svc.reset().await.unwrap().value, 0);
    }

    #[tokio::test]
    async fn mutations_keep_created_at_and_advance_updated_at() {
        let svc = service();
        let created = svc.get().await.unwrap();
        let mut last = created.updated_at;
        for c in [
            svc.increment().await.unwrap(),
            svc.set(5).await.unwrap(),
            svc.reset().await.unwrap(),
        ] {
            assert_eq!(c.created_at, created.created_at);
            assert!(c.updated_at >= last);
            assert!(c.updated_at >= c.created_at);
            last = c.updated_at;
        }
    }

    #[tokio::test]
    async fn reads_do_not_touch_updated_at() {
        let svc = service();
        let a = svc.set(3).await.unwrap();
        let b = svc.get().await.unwrap();
        assert_eq!(a.updated_at, b.updated_at);
    }

    #[tokio::test]
    async fn concurrent_increments_are_not_lost() {
        let svc = CounterService::new(Arc::new(MemoryCounterStore::with_value(5)));
        let (a, b) = tokio::join!(svc.increment(), svc.increment());
        let mut seen = vec![a.unwrap().value, b.unwrap().value];
        seen.sort();
        assert_eq!(seen, vec![6, 7]);
        assert_eq!(svc.get().await.unwrap().value, 7);
    }

    #[tokio::test]
    async fn concurrent_first_access_creates_one_row() {
        let svc = service();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let svc = svc.clone();
                tokio::spawn(async move { svc.get().await.unwrap() })
            })
            .collect();
        let mut created = Vec::new();
        for h in handles {
            created.push(h.await.unwrap().created_at);
        }
        created.dedup();
        assert_eq!(created.len(), 1);
    }
}
