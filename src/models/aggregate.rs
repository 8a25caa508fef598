// Aggregate: sealed summary of one compaction interval.
// Scalars only; the samples themselves are dropped once folded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One compaction interval. `index` starts at 1 and is contiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    pub index: u64,
    pub started_at: DateTime<Utc>,
    pub sealed_at: DateTime<Utc>,
    pub sample_count: u64,
    pub fallback_count: u64,
    pub uptime_percent: f64,
    pub average_latency: f64,
    pub max_latency: f64,
    pub average_packet_loss: f64,
    pub average_deviation: f64,
}
