use counter_stack::{
    app, AppState, ClientError, CounterApi, CounterQuery, HttpCounterApi, MemoryCounterStore, QueryOptions,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Bind before spawning so the port is ready when the client connects.
async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let router = app(AppState::new(Arc::new(MemoryCounterStore::new())), 16 * 1024);
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn http_api_round_trip() {
    let base = spawn_server().await;
    let api = HttpCounterApi::new(format!("{}/", base)).unwrap();
    assert_eq!(api.get().await.unwrap().value, 0);
    assert_eq!(api.increment().await.unwrap().value, 1);
    assert_eq!(api.set(10).await.unwrap().value, 10);
    assert_eq!(api.reset().await.unwrap().value, 0);
}

#[tokio::test]
async fn http_api_surfaces_validation_message() {
    let base = spawn_server().await;
    let api = HttpCounterApi::new(base).unwrap();
    match api.set(-5).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "value must be at least 0");
        }
        other => panic!("expected API error, got {:?}", other),
    }
    assert_eq!(api.get().await.unwrap().value, 0);
}

#[tokio::test]
async fn query_reconciles_with_server_after_mutations() {
    let base = spawn_server().await;
    let query = CounterQuery::new(HttpCounterApi::new(base.clone()).unwrap());
    assert_eq!(query.read().await.unwrap().value, 0);

    // Another client changes the value behind the cache.
    let other = HttpCounterApi::new(base).unwrap();
    other.set(41).await.unwrap();

    let after = query.increment().await.unwrap();
    assert_eq!(after.value, 42);
    assert_eq!(query.cached().await.unwrap().value, 42);
    assert!(query.is_stale().await);
    assert_eq!(query.read().await.unwrap().value, 42);
}

#[tokio::test]
async fn query_gives_up_on_unreachable_server() {
    // Port is released as soon as the listener drops.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let options = QueryOptions {
        retry_delay: Duration::from_millis(10),
        ..QueryOptions::default()
    };
    let query = CounterQuery::with_options(HttpCounterApi::new(format!("http://{}", addr)).unwrap(), options);
    assert!(matches!(query.read().await, Err(ClientError::Http(_))));
    assert!(query.cached().await.is_none());
}
