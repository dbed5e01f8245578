//! HTTP handlers for the counter resource and service endpoints.

pub mod counter;
pub mod system;
pub use counter::*;
pub use system::*;
