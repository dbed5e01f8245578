//! Client data layer: HTTP access to the counter API and a read-through cache over it.

mod api;
mod query;

pub use api::{ClientError, CounterApi, HttpCounterApi};
pub use query::{CounterQuery, QueryOptions, COUNTER_QUERY_KEY};
