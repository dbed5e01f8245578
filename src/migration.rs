//! Schema bootstrap for the counters table. Idempotent; run once at startup.

use crate::error::StoreError;
use crate::store::COUNTERS_TABLE;
use sqlx::PgPool;

/// CREATE TABLE IF NOT EXISTS for `counters`. The value column carries its own
/// non-negative CHECK so no write path can persist a negative count.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), StoreError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id INTEGER PRIMARY KEY,
            value INTEGER NOT NULL DEFAULT 0 CHECK (value >= 0),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        COUNTERS_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    tracing::info!(table = COUNTERS_TABLE, "schema ready");
    Ok(())
}
