//! Cluster status snapshot.

use serde::{Deserialize, Deserializer};

/// Read `null` as zero, leaving the other fields of the document intact.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Values decoded from one `/v1/cluster` response.
///
/// A snapshot is built fresh for every scrape and dropped once its samples
/// have been emitted. Unknown keys are ignored and missing keys read as zero,
/// so a field absent from this document never inherits an older value. An
/// explicit `null` also reads as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterStatus {
    #[serde(deserialize_with = "null_as_zero")]
    pub running_queries: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub blocked_queries: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub queued_queries: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub active_workers: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub running_drivers: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub reserved_memory: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub total_input_rows: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub total_input_bytes: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub total_cpu_time_secs: f64,
}

impl ClusterStatus {
    /// Decode a status document.
    ///
    /// # Errors
    /// Returns the decoder error for malformed JSON or non-numeric fields.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}
