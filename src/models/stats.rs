// Query results: per-window statistics, additive totals, and the full payload served over HTTP.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Aggregate;

/// How a `WindowStats` was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsMethod {
    /// Computed over buffer samples only.
    Exact,
    /// Live buffer figure averaged with aggregate means (lossy).
    Blended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStats {
    pub uptime_percent: f64,
    pub average_latency: f64,
    pub max_latency: f64,
    pub average_packet_loss: f64,
    pub average_deviation: f64,
    /// Buffer samples that fed the live part of the figure.
    pub sample_count: u64,
    pub fallback_count: u64,
    pub method: StatsMethod,
}

/// Exact counts over every sample ever recorded (buffer + all aggregates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_probes: u64,
    pub total_retries: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSet {
    pub ten_minutes: WindowStats,
    pub one_hour: WindowStats,
    pub twenty_four_hours: WindowStats,
    pub lifetime: WindowStats,
}

/// Everything the query surface and report writer need, read under one consistent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub started_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    pub windows: WindowSet,
    pub totals: Totals,
    pub buffer_len: usize,
    pub aggregates: Vec<Aggregate>,
}
