// GET handlers: version, uptime summary, stats, aggregates, status

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;

use super::AppState;
use crate::metrics::Window;
use crate::report::humanize_elapsed;
use crate::scheduler::TickCountersSnapshot;
use crate::version::{NAME, VERSION};

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UptimeResponse {
    uptime_percentage_24h: f64,
    uptime_percentage_lifetime: f64,
    last_updated: String,
}

/// GET /uptime — 24h and lifetime uptime plus a humanized time since start.
pub(super) async fn uptime_handler(State(state): State<AppState>) -> impl IntoResponse {
    let report = state.monitor.report();
    axum::Json(UptimeResponse {
        uptime_percentage_24h: report.windows.twenty_four_hours.uptime_percent,
        uptime_percentage_lifetime: report.windows.lifetime.uptime_percent,
        last_updated: humanize_elapsed(state.monitor.uptime()),
    })
}

/// GET /api/stats — every window, totals, and the aggregate history.
pub(super) async fn stats_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.monitor.report())
}

/// GET /api/stats/{window} — one window (tenMinutes, oneHour, twentyFourHours, lifetime).
pub(super) async fn window_handler(
    State(state): State<AppState>,
    Path(window): Path<Window>,
) -> impl IntoResponse {
    axum::Json(state.monitor.query(window))
}

/// GET /api/aggregates — sealed compaction intervals, oldest first.
pub(super) async fn aggregates_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.monitor.aggregates())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    started_at: chrono::DateTime<chrono::Utc>,
    uptime_secs: u64,
    primary_target: String,
    fallback_target: String,
    probe_interval_ms: u64,
    compaction_interval_secs: u64,
    buffer_len: usize,
    aggregate_count: usize,
    counters: TickCountersSnapshot,
}

/// GET /api/status — process timing, targets, buffer size, and tick counters.
pub(super) async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let probe = &state.config.probe;
    axum::Json(StatusResponse {
        started_at: state.monitor.started_at(),
        uptime_secs: state.monitor.uptime().as_secs(),
        primary_target: probe.primary_target.clone(),
        fallback_target: probe.fallback_target.clone(),
        probe_interval_ms: probe.interval_ms,
        compaction_interval_secs: state.config.compaction.interval_secs,
        buffer_len: state.monitor.buffer_len(),
        aggregate_count: state.monitor.aggregate_count(),
        counters: state.counters.snapshot(),
    })
}
