// Shared test helpers
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use pingwatch::models::Aggregate;
use pingwatch::probe::{ProbeError, ProbeOutcome, Prober};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Prober that replays scripted outcomes per target and records every call.
/// Unscripted calls return `fallback_outcome`.
pub struct ScriptedProber {
    script: Mutex<HashMap<String, VecDeque<Result<ProbeOutcome, ProbeError>>>>,
    fallback_outcome: ProbeOutcome,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProber {
    pub fn new(fallback_outcome: ProbeOutcome) -> Self {
        Self {
            script: Mutex::new(HashMap::new()),
            fallback_outcome,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn always_up() -> Self {
        Self::new(ProbeOutcome::reachable(10.0, 0.0))
    }

    pub fn push(self, target: &str, result: Result<ProbeOutcome, ProbeError>) -> Self {
        self.script
            .lock()
            .unwrap()
            .entry(target.to_string())
            .or_default()
            .push_back(result);
        self
    }
}

impl Prober for ScriptedProber {
    async fn probe(&self, target: &str) -> Result<ProbeOutcome, ProbeError> {
        self.calls.lock().unwrap().push(target.to_string());
        self.script
            .lock()
            .unwrap()
            .get_mut(target)
            .and_then(|q| q.pop_front())
            .unwrap_or(Ok(self.fallback_outcome))
    }
}

pub fn transport_failure(target: &str) -> Result<ProbeOutcome, ProbeError> {
    Err(ProbeError::NoAddress(target.to_string()))
}

pub fn aggregate(index: u64, at: DateTime<Utc>, uptime_percent: f64) -> Aggregate {
    Aggregate {
        index,
        started_at: at,
        sealed_at: at,
        sample_count: 10,
        fallback_count: 1,
        uptime_percent,
        average_latency: 20.0,
        max_latency: 40.0,
        average_packet_loss: 0.0,
        average_deviation: 5.0,
    }
}
