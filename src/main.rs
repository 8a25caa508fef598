use anyhow::Result;
use pingwatch::*;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    let monitor = Arc::new(state::MonitorState::new());
    let counters = Arc::new(scheduler::TickCounters::default());
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let probe_config = &app_config.probe;
    let executor = Arc::new(probe::ProbeExecutor::new(
        probe::TcpProber::new(
            probe_config.attempts,
            Duration::from_millis(probe_config.timeout_ms),
        ),
        probe_config.primary_target.clone(),
        probe_config.fallback_target.clone(),
    ));
    tracing::info!(
        primary = %probe_config.primary_target,
        fallback = %probe_config.fallback_target,
        interval_ms = probe_config.interval_ms,
        "probing"
    );

    let scheduler_handles = scheduler::spawn(
        scheduler::SchedulerDeps {
            state: monitor.clone(),
            executor,
            counters: counters.clone(),
            shutdown_rx: shutdown_rx.clone(),
        },
        scheduler::SchedulerConfig {
            probe_interval_ms: probe_config.interval_ms,
            compaction_interval_secs: app_config.compaction.interval_secs,
            stats_log_interval_secs: app_config.monitoring.stats_log_interval_secs,
        },
    );
    let report_handle = app_config
        .report
        .enabled
        .then(|| report::spawn(monitor.clone(), app_config.report.clone(), shutdown_rx));

    let app = routes::app(monitor, counters, app_config.clone());
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
        }
    }

    let _ = shutdown_tx.send(true);
    scheduler_handles.join().await;
    if let Some(handle) = report_handle {
        let _ = handle.await;
    }
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
