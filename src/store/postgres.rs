//! PostgreSQL-backed counter store over an explicitly owned pool.

use super::{CounterStore, StoreInfo};
use crate::config::DatabaseConfig;
use crate::error::{AppError, ConfigError, StoreError};
use crate::model::{Counter, COUNTER_ID};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};

/// Table holding the singleton row.
pub const COUNTERS_TABLE: &str = "counters";

const RETURNING: &str = "RETURNING id, value, created_at, updated_at";

type CounterRow = (i32, i32, DateTime<Utc>, DateTime<Utc>);

fn to_counter((id, value, created_at, updated_at): CounterRow) -> Counter {
    Counter {
        id,
        value,
        created_at,
        updated_at,
    }
}

/// Store handle. Cloning shares the pool; call [`PgCounterStore::close`] once at shutdown.
#[derive(Clone)]
pub struct PgCounterStore {
    pool: PgPool,
}

impl PgCounterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the pool from config. Opens the first connection before returning, so an
    /// unreachable database fails startup.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let options = config.connect_options()?;
        tracing::info!(
            host = options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or("postgres"),
            "connecting to PostgreSQL"
        );
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(options)
            .await
            .map_err(StoreError::from)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl CounterStore for PgCounterStore {
    async fn find_singleton(&self) -> Result<Option<Counter>, StoreError> {
        let sql = format!(
            "SELECT id, value, created_at, updated_at FROM {} WHERE id = $1",
            COUNTERS_TABLE
        );
        tracing::debug!(sql = %sql, "query");
        let row: Option<CounterRow> = sqlx::query_as(&sql)
            .bind(COUNTER_ID)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(to_counter))
    }

    async fn create(&self, initial: i32) -> Result<Option<Counter>, StoreError> {
        let sql = format!(
            "INSERT INTO {} (id, value, created_at, updated_at) VALUES ($1, $2, NOW(), NOW()) ON CONFLICT (id) DO NOTHING {}",
            COUNTERS_TABLE, RETURNING
        );
        tracing::debug!(sql = %sql, initial, "query");
        let row: Option<CounterRow> = sqlx::query_as(&sql)
            .bind(COUNTER_ID)
            .bind(initial)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(to_counter))
    }

    async fn update_value(&self, value: i32) -> Result<Option<Counter>, StoreError> {
        let sql = format!(
            "UPDATE {} SET value = $2, updated_at = GREATEST(NOW(), created_at) WHERE id = $1 {}",
            COUNTERS_TABLE, RETURNING
        );
        tracing::debug!(sql = %sql, value, "query");
        let row: Option<CounterRow> = sqlx::query_as(&sql)
            .bind(COUNTER_ID)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(to_counter))
    }

    async fn increment(&self) -> Result<Counter, StoreError> {
        // Row lock taken by ON CONFLICT serializes concurrent increments.
        let sql = format!(
            r#"
            INSERT INTO {table} (id, value, created_at, updated_at)
            VALUES ($1, 1, NOW(), NOW())
            ON CONFLICT (id)
            DO UPDATE SET value = {table}.value + 1, updated_at = GREATEST(NOW(), {table}.created_at)
            {returning}
            "#,
            table = COUNTERS_TABLE,
            returning = RETURNING
        );
        tracing::debug!(sql = %sql, "query");
        let row: CounterRow = sqlx::query_as(&sql)
            .bind(COUNTER_ID)
            .fetch_one(&self.pool)
            .await?;
        Ok(to_counter(row))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn diagnostics(&self) -> Result<StoreInfo, StoreError> {
        let (current_time, version): (DateTime<Utc>, String) =
            sqlx::query_as("SELECT NOW(), version()")
                .fetch_one(&self.pool)
                .await?;
        Ok(StoreInfo {
            current_time,
            store_version: short_version(&version),
        })
    }
}

/// "PostgreSQL 16.2 on x86_64-pc-linux-gnu, ..." -> "PostgreSQL 16.2".
fn short_version(full: &str) -> String {
    full.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}

/// Ensure the database named in `options` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(options: &PgConnectOptions) -> Result<(), AppError> {
    let db_name = options.get_database().unwrap_or("").to_string();
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let admin = options.clone().database("postgres");
    let mut conn = admin
        .connect()
        .await
        .map_err(|e| ConfigError::Connect(e.to_string()))?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await
        .map_err(StoreError::from)?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(StoreError::from)?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
