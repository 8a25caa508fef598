// HTTP routes: read-only query surface over the monitor state

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::AppConfig;
use crate::scheduler::TickCounters;
use crate::state::MonitorState;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) monitor: Arc<MonitorState>,
    pub(crate) counters: Arc<TickCounters>,
    pub(crate) config: AppConfig,
}

pub fn app(monitor: Arc<MonitorState>, counters: Arc<TickCounters>, config: AppConfig) -> Router {
    let static_dir = config.server.static_dir.clone();
    let state = AppState {
        monitor,
        counters,
        config,
    };
    let router = Router::new()
        .route("/version", get(http::version_handler)) // GET /version
        .route("/uptime", get(http::uptime_handler)) // GET /uptime
        .route("/api/stats", get(http::stats_handler)) // GET /api/stats
        .route("/api/stats/{window}", get(http::window_handler)) // GET /api/stats/tenMinutes
        .route("/api/aggregates", get(http::aggregates_handler)) // GET /api/aggregates
        .route("/api/status", get(http::status_handler)); // GET /api/status
    // Dashboard files (index.html at /) when configured, otherwise a text banner.
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.route("/", get(|| async { "pingwatch: probing, see /uptime" })),
    };
    router
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
