// Compactor: on a fixed period, fold the live buffer into one aggregate and reset it.
// Runs on its own interval, independent of the probe cadence.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::config::MAX_SCHEDULE_SECS;
use crate::metrics::summarize;
use crate::models::{Aggregate, Sample};
use crate::scheduler::TickCounters;
use crate::state::MonitorState;

/// Config for the compactor task.
#[derive(Debug, Clone)]
pub struct CompactorConfig {
    pub interval_secs: u64,
}

/// Builds the aggregate for one interval. Empty input is valid and yields an all-zero aggregate.
pub fn aggregate_samples(
    samples: &[Sample],
    index: u64,
    started_at: DateTime<Utc>,
    sealed_at: DateTime<Utc>,
) -> Aggregate {
    let summary = summarize(samples);
    Aggregate {
        index,
        started_at,
        sealed_at,
        sample_count: summary.sample_count,
        fallback_count: summary.fallback_count,
        uptime_percent: summary.uptime_percent,
        average_latency: summary.average_latency,
        max_latency: summary.max_latency,
        average_packet_loss: summary.average_packet_loss,
        average_deviation: summary.average_deviation,
    }
}

/// Spawns the compactor. First compaction happens one full period after start.
pub fn spawn(
    state: Arc<MonitorState>,
    counters: Arc<TickCounters>,
    config: CompactorConfig,
    shutdown_rx: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        run(state, counters, config, shutdown_rx).await;
    })
}

#[instrument(skip_all, fields(interval_secs = config.interval_secs))]
async fn run(
    state: Arc<MonitorState>,
    counters: Arc<TickCounters>,
    config: CompactorConfig,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    // Clamped so the first deadline can never overflow the clock.
    let period = Duration::from_secs(config.interval_secs.clamp(1, MAX_SCHEDULE_SECS));
    let mut tick = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = tick.tick() => {
                run_one_tick(&state, &counters);
            }
            _ = shutdown_rx.changed() => {
                debug!("compactor shutting down");
                break;
            }
        }
    }
}

/// Runs one compaction and records it in the counters.
pub fn run_one_tick(state: &MonitorState, counters: &TickCounters) -> Aggregate {
    let aggregate = state.compact();
    counters.compactions.fetch_add(1, Ordering::Relaxed);
    info!(
        index = aggregate.index,
        samples = aggregate.sample_count,
        fallbacks = aggregate.fallback_count,
        uptime_percent = aggregate.uptime_percent,
        average_latency_ms = aggregate.average_latency,
        "buffer compacted"
    );
    aggregate
}
