//! HAFAS REST API response DTOs.
//!
//! These types map to the `GET /stops/{id}/departures` response of the
//! transport.rest family of APIs. Everything is optional and read
//! leniently: HAFAS omits fields freely, and a field of the wrong JSON type
//! reads as missing instead of failing the whole departure. Realtime
//! fields (`delay`, `cancelled`) stay raw so conversion decides what counts.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Response from `GET /stops/{id}/departures`.
///
/// Newer API versions wrap the list in an object; older ones return a
/// bare array. Records stay as raw JSON until conversion so one malformed
/// record can be skipped on its own.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeparturesResponse {
    Wrapped { departures: Vec<Value> },
    Bare(Vec<Value>),
}

impl DeparturesResponse {
    /// The raw departure records, whatever the envelope.
    pub fn into_records(self) -> Vec<Value> {
        match self {
            DeparturesResponse::Wrapped { departures } => departures,
            DeparturesResponse::Bare(departures) => departures,
        }
    }
}

/// One departure record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureDto {
    /// Scheduled departure time (ISO 8601 with offset).
    #[serde(default, deserialize_with = "lenient")]
    pub planned_when: Option<String>,

    /// Delay in seconds. Usually an integer or null.
    #[serde(default)]
    pub delay: Option<Value>,

    /// Final destination shown on the vehicle.
    #[serde(default, deserialize_with = "lenient")]
    pub direction: Option<String>,

    /// Line the trip runs on.
    #[serde(default, deserialize_with = "lenient")]
    pub line: Option<LineDto>,

    /// Present and `true` only for cancelled trips.
    #[serde(default)]
    pub cancelled: Option<Value>,
}

/// Line information within a departure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineDto {
    /// Display name, e.g. "U2".
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    /// HAFAS product, e.g. "subway", "suburban", "bus", "tram".
    #[serde(default, deserialize_with = "lenient")]
    pub product: Option<String>,
}

/// Read any JSON value, keeping it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}
