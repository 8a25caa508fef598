// Scheduler: drives probing and compaction at independent cadences.
// Each probe tick spawns its own task, so a slow probe never holds up the next tick or compaction.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::watch;
use tokio::time::{Duration, interval};
use tracing::Instrument;

use crate::compactor::{self, CompactorConfig};
use crate::probe::{ProbeExecutor, Prober};
use crate::state::MonitorState;

/// Process-wide tick counters. Shared with the HTTP layer for /api/status.
#[derive(Debug, Default)]
pub struct TickCounters {
    pub probe_ticks: AtomicU64,
    pub samples_recorded: AtomicU64,
    /// Ticks that produced no sample (probe transport failure).
    pub probes_skipped: AtomicU64,
    pub compactions: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickCountersSnapshot {
    pub probe_ticks: u64,
    pub samples_recorded: u64,
    pub probes_skipped: u64,
    pub compactions: u64,
}

impl TickCounters {
    pub fn snapshot(&self) -> TickCountersSnapshot {
        TickCountersSnapshot {
            probe_ticks: self.probe_ticks.load(Ordering::Relaxed),
            samples_recorded: self.samples_recorded.load(Ordering::Relaxed),
            probes_skipped: self.probes_skipped.load(Ordering::Relaxed),
            compactions: self.compactions.load(Ordering::Relaxed),
        }
    }
}

/// State, executor, counters, and shutdown for the scheduler.
pub struct SchedulerDeps<P> {
    pub state: Arc<MonitorState>,
    pub executor: Arc<ProbeExecutor<P>>,
    pub counters: Arc<TickCounters>,
    pub shutdown_rx: watch::Receiver<bool>,
}

/// Cadences for the scheduled tasks.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub probe_interval_ms: u64,
    pub compaction_interval_secs: u64,
    /// How often to log app stats (real seconds).
    pub stats_log_interval_secs: u64,
}

pub struct SchedulerHandles {
    pub probe: tokio::task::JoinHandle<()>,
    pub compactor: tokio::task::JoinHandle<()>,
}

impl SchedulerHandles {
    pub async fn join(self) {
        if let Err(e) = self.probe.await {
            tracing::warn!(error = %e, "probe loop task failed");
        }
        if let Err(e) = self.compactor.await {
            tracing::warn!(error = %e, "compactor task failed");
        }
    }
}

pub fn spawn<P: Prober>(deps: SchedulerDeps<P>, config: SchedulerConfig) -> SchedulerHandles {
    let compactor = compactor::spawn(
        deps.state.clone(),
        deps.counters.clone(),
        CompactorConfig {
            interval_secs: config.compaction_interval_secs,
        },
        deps.shutdown_rx.clone(),
    );
    let probe = spawn_probe_loop(deps, config);
    SchedulerHandles { probe, compactor }
}

fn spawn_probe_loop<P: Prober>(
    deps: SchedulerDeps<P>,
    config: SchedulerConfig,
) -> tokio::task::JoinHandle<()> {
    let SchedulerDeps {
        state,
        executor,
        counters,
        mut shutdown_rx,
    } = deps;
    let SchedulerConfig {
        probe_interval_ms,
        stats_log_interval_secs,
        ..
    } = config;

    let span = tracing::span!(tracing::Level::DEBUG, "probe_loop", probe_interval_ms);
    let task = async move {
        let mut tick = interval(Duration::from_millis(probe_interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    counters.probe_ticks.fetch_add(1, Ordering::Relaxed);
                    let executor = executor.clone();
                    let state = state.clone();
                    let counters = counters.clone();
                    tokio::spawn(async move {
                        if executor.run_tick(&state).await {
                            counters.samples_recorded.fetch_add(1, Ordering::Relaxed);
                        } else {
                            counters.probes_skipped.fetch_add(1, Ordering::Relaxed);
                        }
                    });
                }
                _ = stats_log_tick.tick() => {
                    let c = counters.snapshot();
                    tracing::info!(
                        probe_ticks = c.probe_ticks,
                        samples_recorded = c.samples_recorded,
                        probes_skipped = c.probes_skipped,
                        compactions = c.compactions,
                        buffer_len = state.buffer_len(),
                        aggregates = state.aggregate_count(),
                        "app stats"
                    );
                }
                _ = shutdown_rx.changed() => {
                    tracing::debug!("probe loop shutting down");
                    break;
                }
            }
        }
    };
    tokio::spawn(task.instrument(span))
}
