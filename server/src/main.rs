//! Counter API server.
//!
//! Run from repo root: `cargo run -p counter-server`
//! Without a database: `STORE_BACKEND=memory cargo run -p counter-server`

use counter_stack::{
    app, apply_migrations, ensure_database_exists, AppState, CounterStore, MemoryCounterStore,
    PgCounterStore, ServerConfig, StoreBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("counter_stack=info,counter_server=info")
            }),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let pg = match config.backend {
        StoreBackend::Postgres => {
            if config.database.ensure_database {
                ensure_database_exists(&config.database.connect_options()?).await?;
            }
            let store = PgCounterStore::connect(&config.database).await?;
            apply_migrations(store.pool()).await?;
            Some(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; counter resets on restart");
            None
        }
    };
    let store: Arc<dyn CounterStore> = match &pg {
        Some(store) => Arc::new(store.clone()),
        None => Arc::new(MemoryCounterStore::new()),
    };

    let router = app(AppState::new(store), config.body_limit);
    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(store) = pg {
        store.close().await;
        tracing::info!("database pool closed");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("SIGINT received, shutting down"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
