//! Counter stack: REST backend for a single persisted counter, plus a caching client.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use client::{ClientError, CounterApi, CounterQuery, HttpCounterApi, QueryOptions};
pub use config::{DatabaseConfig, ServerConfig, StoreBackend};
pub use error::{AppError, ConfigError, StoreError};
pub use migration::apply_migrations;
pub use model::{Counter, COUNTER_ID, MAX_COUNTER_VALUE};
pub use routes::{app, common_routes, counter_routes};
pub use service::CounterService;
pub use state::AppState;
pub use store::{ensure_database_exists, CounterStore, MemoryCounterStore, PgCounterStore};
