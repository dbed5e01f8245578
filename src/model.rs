//! Counter record and wire types shared by the server and the client.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

/// Fixed key of the singleton counter row.
pub const COUNTER_ID: i32 = 1;

/// Largest value the `counters.value` column (PostgreSQL `INTEGER`) can hold.
pub const MAX_COUNTER_VALUE: i32 = i32::MAX;

/// The singleton counter. Serialized as `{id, value, createdAt, updatedAt}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Counter {
    pub id: i32,
    /// Always `>= 0`.
    #[schema(minimum = 0)]
    pub value: i32,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Body of `PUT /api/counter`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SetCounterRequest {
    #[schema(minimum = 0)]
    pub value: i32,
}

/// Error body returned with every non-2xx API response.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// ISO-8601 with millisecond precision and `Z`, e.g. `2024-05-01T12:00:00.000Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_timestamp(ts))
}
