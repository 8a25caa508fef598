// Probe executor: primary first, exactly one fallback check on failure, record whichever ran last.

use chrono::Utc;
use tracing::{debug, warn};

use super::{ProbeOutcome, Prober};
use crate::models::Sample;
use crate::state::MonitorState;

pub struct ProbeExecutor<P> {
    prober: P,
    primary: String,
    fallback: String,
}

impl<P: Prober> ProbeExecutor<P> {
    pub fn new(prober: P, primary: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            prober,
            primary: primary.into(),
            fallback: fallback.into(),
        }
    }

    /// One probe cycle. `None` when a transport failure stopped the cycle; nothing is recorded
    /// for that tick.
    pub async fn execute_probe(&self) -> Option<Sample> {
        let primary = self.check(&self.primary).await?;
        if primary.alive {
            return Some(to_sample(primary, false));
        }
        debug!(probe_target = %self.primary, "primary down, trying fallback");
        // The fallback's outcome is recorded whether it is up or down.
        let fallback = self.check(&self.fallback).await?;
        Some(to_sample(fallback, true))
    }

    /// Executes one probe and appends the sample, if any. Returns whether a sample was recorded.
    pub async fn run_tick(&self, state: &MonitorState) -> bool {
        match self.execute_probe().await {
            Some(sample) => {
                state.append(sample);
                true
            }
            None => false,
        }
    }

    async fn check(&self, target: &str) -> Option<ProbeOutcome> {
        match self.prober.probe(target).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(
                    error = %e,
                    probe_target = target,
                    operation = "probe",
                    "probe could not be performed; tick skipped"
                );
                None
            }
        }
    }
}

fn to_sample(outcome: ProbeOutcome, used_fallback: bool) -> Sample {
    let timestamp = Utc::now();
    let sample = if outcome.alive {
        Sample {
            timestamp,
            alive: true,
            latency_ms: outcome.latency_ms,
            packet_loss: outcome.packet_loss,
            used_fallback: false,
        }
    } else {
        Sample::dead(timestamp)
    };
    if used_fallback {
        sample.via_fallback()
    } else {
        sample
    }
}
