//! Process configuration from environment variables.

mod loader;
mod types;

pub use types::{DatabaseConfig, ServerConfig, StoreBackend};
