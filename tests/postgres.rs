//! Runs against a real database: `DATABASE_URL=postgres://... cargo test -- --ignored`.
//! Uses the `counters` table of that database and overwrites its row.

use counter_stack::{apply_migrations, CounterStore, PgCounterStore};
use sqlx::postgres::PgPoolOptions;

async fn store() -> Option<PgCounterStore> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("connect DATABASE_URL");
    apply_migrations(&pool).await.expect("migrations");
    Some(PgCounterStore::new(pool))
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn pg_increment_is_atomic_and_timestamps_hold() {
    let Some(store) = store().await else {
        return;
    };

    let seeded = match store.update_value(5).await.unwrap() {
        Some(c) => c,
        None => match store.create(5).await.unwrap() {
            Some(c) => c,
            None => store.update_value(5).await.unwrap().unwrap(),
        },
    };
    assert_eq!(seeded.value, 5);
    assert!(store.create(0).await.unwrap().is_none());

    let (a, b) = tokio::join!(store.increment(), store.increment());
    let (a, b) = (a.unwrap(), b.unwrap());
    let mut values = vec![a.value, b.value];
    values.sort();
    assert_eq!(values, vec![6, 7]);

    let row = store.find_singleton().await.unwrap().unwrap();
    assert_eq!(row.value, 7);
    assert_eq!(row.created_at, seeded.created_at);
    assert!(row.updated_at >= row.created_at);
    assert!(row.updated_at >= seeded.updated_at);

    let reset = store.update_value(0).await.unwrap().unwrap();
    assert_eq!(reset.value, 0);
    assert_eq!(reset.created_at, seeded.created_at);
    store.close().await;
}
