//! Read-through cache for the counter. The server is the source of truth; this only
//! remembers the last authoritative row and when it was fetched.

use super::api::{ClientError, CounterApi};
use crate::model::Counter;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Key of the single cached entry.
pub const COUNTER_QUERY_KEY: &str = "counter";

#[derive(Clone, Debug)]
pub struct QueryOptions {
    /// How long a fetched value is served without refetching.
    pub stale_time: Duration,
    /// Extra attempts after a failed read. Mutations are never retried.
    pub retry: u32,
    pub retry_delay: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_millis(1000),
            retry: 2,
            retry_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    counter: Counter,
    fetched_at: Instant,
    /// Set after a mutation; the next read goes to the server.
    invalidated: bool,
}

pub struct CounterQuery<A> {
    api: A,
    options: QueryOptions,
    entry: RwLock<Option<CacheEntry>>,
}

impl<A: CounterApi> CounterQuery<A> {
    pub fn new(api: A) -> Self {
        Self::with_options(api, QueryOptions::default())
    }

    pub fn with_options(api: A, options: QueryOptions) -> Self {
        Self {
            api,
            options,
            entry: RwLock::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Last known value, fresh or not.
    pub async fn cached(&self) -> Option<Counter> {
        self.entry.read().await.as_ref().map(|e| e.counter.clone())
    }

    /// True when nothing is cached, the entry was invalidated, or it is older than `stale_time`.
    pub async fn is_stale(&self) -> bool {
        match self.entry.read().await.as_ref() {
            None => true,
            Some(e) => e.invalidated || e.fetched_at.elapsed() >= self.options.stale_time,
        }
    }

    /// Cached value while fresh; otherwise fetch with retries.
    /// On failure the error is returned and any previous value stays cached.
    pub async fn read(&self) -> Result<Counter, ClientError> {
        if !self.is_stale().await {
            if let Some(c) = self.cached().await {
                return Ok(c);
            }
        }
        self.refetch().await
    }

    /// Fetch regardless of freshness.
    pub async fn refetch(&self) -> Result<Counter, ClientError> {
        let counter = self.fetch_with_retry().await?;
        self.store(counter.clone(), false).await;
        Ok(counter)
    }

    pub async fn increment(&self) -> Result<Counter, ClientError> {
        let counter = self.api.increment().await?;
        self.apply_mutation(counter).await
    }

    pub async fn reset(&self) -> Result<Counter, ClientError> {
        let counter = self.api.reset().await?;
        self.apply_mutation(counter).await
    }

    pub async fn set(&self, value: i32) -> Result<Counter, ClientError> {
        let counter = self.api.set(value).await?;
        self.apply_mutation(counter).await
    }

    async fn fetch_with_retry(&self) -> Result<Counter, ClientError> {
        let mut attempt = 0;
        loop {
            match self.api.get().await {
                Ok(c) => return Ok(c),
                Err(e) if attempt < self.options.retry => {
                    attempt += 1;
                    tracing::warn!(
                        key = COUNTER_QUERY_KEY,
                        attempt,
                        error = %e,
                        "counter fetch failed, retrying"
                    );
                    tokio::time::sleep(self.options.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// The response overwrites the cache and the entry is invalidated for the next read.
    async fn apply_mutation(&self, counter: Counter) -> Result<Counter, ClientError> {
        self.store(counter.clone(), true).await;
        Ok(counter)
    }

    async fn store(&self, counter: Counter, invalidated: bool) {
        *self.entry.write().await = Some(CacheEntry {
            counter,
            fetched_at: Instant::now(),
            invalidated,
        });
    }
}
