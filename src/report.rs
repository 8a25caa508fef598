// Report writer: at fixed elapsed-process-time checkpoints, render every window to a text file.
// Read-only consumer of the monitor state.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::config::ReportConfig;
use crate::metrics::Window;
use crate::models::{StatsReport, WindowStats};
use crate::state::MonitorState;

const SECS_PER_YEAR: u64 = 31_536_000;
const SECS_PER_MONTH: u64 = 2_592_000;
const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_MINUTE: u64 = 60;

/// Coarse "time since" string: the largest unit that fits more than once, floored.
pub fn humanize_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    for (unit, name) in [
        (SECS_PER_YEAR, "years"),
        (SECS_PER_MONTH, "months"),
        (SECS_PER_DAY, "days"),
        (SECS_PER_HOUR, "hours"),
        (SECS_PER_MINUTE, "minutes"),
    ] {
        if secs > unit {
            return format!("{} {}", secs / unit, name);
        }
    }
    format!("{} seconds", secs)
}

/// File-name label for a checkpoint, e.g. 3600 -> "1h", 604800 -> "7d".
pub fn checkpoint_label(secs: u64) -> String {
    if secs % SECS_PER_DAY == 0 {
        format!("{}d", secs / SECS_PER_DAY)
    } else if secs % SECS_PER_HOUR == 0 {
        format!("{}h", secs / SECS_PER_HOUR)
    } else if secs % SECS_PER_MINUTE == 0 {
        format!("{}m", secs / SECS_PER_MINUTE)
    } else {
        format!("{}s", secs)
    }
}

pub fn render_report(report: &StatsReport, elapsed: Duration) -> String {
    let mut out = format!(
        "Uptime report\n\
         =============\n\
         Started:   {}\n\
         Generated: {}\n\
         Running:   {}\n\n",
        report.started_at.to_rfc3339(),
        report.generated_at.to_rfc3339(),
        humanize_elapsed(elapsed),
    );

    let w = &report.windows;
    for (window, stats) in [
        (Window::TenMinutes, &w.ten_minutes),
        (Window::OneHour, &w.one_hour),
        (Window::TwentyFourHours, &w.twenty_four_hours),
        (Window::Lifetime, &w.lifetime),
    ] {
        out.push_str(&render_window(window, stats));
    }

    out.push_str(&format!(
        "Total probes:  {}\nTotal retries: {}\nIntervals:     {}\n",
        report.totals.total_probes,
        report.totals.total_retries,
        report.aggregates.len(),
    ));
    out
}

fn render_window(window: Window, stats: &WindowStats) -> String {
    format!(
        "[{}] ({:?})\n\
         \x20 uptime:       {:.2}%\n\
         \x20 avg latency:  {:.2} ms\n\
         \x20 max latency:  {:.2} ms\n\
         \x20 avg deviation: {:.2} ms\n\
         \x20 packet loss:  {:.2}%\n\n",
        window.label(),
        stats.method,
        stats.uptime_percent,
        stats.average_latency,
        stats.max_latency,
        stats.average_deviation,
        stats.average_packet_loss,
    )
}

/// Writes `report-<label>.txt` into `dir`, creating the directory if needed.
pub async fn write_report(dir: &Path, label: &str, contents: &str) -> anyhow::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format!("report-{}.txt", label));
    tokio::fs::write(&path, contents).await?;
    Ok(path)
}

/// Spawns the report writer. Checkpoints are measured from the state's process start.
pub fn spawn(
    state: Arc<MonitorState>,
    config: ReportConfig,
    shutdown_rx: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        run(state, config, shutdown_rx).await;
    })
}

#[instrument(skip_all, fields(dir = %config.dir))]
async fn run(
    state: Arc<MonitorState>,
    config: ReportConfig,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut checkpoints = config.checkpoints_secs.clone();
    checkpoints.sort_unstable();
    checkpoints.dedup();
    let dir = PathBuf::from(&config.dir);

    for secs in checkpoints {
        let Some(due) = state.process_start().checked_add(Duration::from_secs(secs)) else {
            warn!(checkpoint_secs = secs, "checkpoint out of range; remaining reports skipped");
            return;
        };
        tokio::select! {
            _ = tokio::time::sleep_until(due) => {}
            _ = shutdown_rx.changed() => {
                debug!("report writer shutting down");
                return;
            }
        }
        let label = checkpoint_label(secs);
        let contents = render_report(&state.report(), state.uptime());
        match write_report(&dir, &label, &contents).await {
            Ok(path) => info!(path = %path.display(), "report written"),
            Err(e) => warn!(error = %e, operation = "write_report", checkpoint = %label, "report write failed"),
        }
    }
    debug!("all report checkpoints written");
}
