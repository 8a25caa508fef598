// One probe outcome, as recorded in the live buffer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a single probe cycle. `latency_ms` and `packet_loss` are only set when `alive`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub alive: bool,
    pub latency_ms: Option<f64>,
    pub packet_loss: Option<f64>,
    /// Primary target failed; this sample reflects the fallback target.
    pub used_fallback: bool,
}

impl Sample {
    pub fn alive(timestamp: DateTime<Utc>, latency_ms: f64, packet_loss: f64) -> Self {
        Self {
            timestamp,
            alive: true,
            latency_ms: Some(latency_ms),
            packet_loss: Some(packet_loss),
            used_fallback: false,
        }
    }

    pub fn dead(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            alive: false,
            latency_ms: None,
            packet_loss: None,
            used_fallback: false,
        }
    }

    pub fn via_fallback(mut self) -> Self {
        self.used_fallback = true;
        self
    }
}
