// Blended estimator for windows that outlive the buffer.
//
// Each statistic is (live + mean over aggregates) / 2. Every aggregate counts equally no matter
// how many samples it holds or how long its interval was. This is an approximation that keeps
// memory bounded; a duration-weighted estimator can replace this module without touching the
// exact path in `exact.rs`.

use crate::models::{Aggregate, StatsMethod, WindowStats};

use super::exact::mean;

/// Aggregates needed before the long windows switch from buffer-only to blended.
pub const MIN_AGGREGATES_FOR_BLEND: usize = 4;

/// Aggregates that make up the "recent" side of the 24-hour estimate.
pub const RECENT_AGGREGATES: usize = 3;

/// Which slice of the aggregate history to blend against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendScope {
    /// The `RECENT_AGGREGATES` most recently sealed aggregates.
    Recent,
    /// Every aggregate ever sealed.
    AllTime,
}

impl BlendScope {
    fn select(self, aggregates: &[Aggregate]) -> &[Aggregate] {
        match self {
            BlendScope::Recent => {
                &aggregates[aggregates.len().saturating_sub(RECENT_AGGREGATES)..]
            }
            BlendScope::AllTime => aggregates,
        }
    }
}

/// Averages `live` with the per-aggregate mean of each statistic. Counts are carried over from
/// `live` unchanged; additive totals are reported separately.
pub fn blend(live: &WindowStats, aggregates: &[Aggregate], scope: BlendScope) -> WindowStats {
    let history = scope.select(aggregates);
    if history.is_empty() {
        return live.clone();
    }
    let hist = |f: fn(&Aggregate) -> f64| mean(&history.iter().map(f).collect::<Vec<_>>());
    let half = |live: f64, past: f64| (live + past) / 2.0;

    WindowStats {
        uptime_percent: half(live.uptime_percent, hist(|a| a.uptime_percent)),
        average_latency: half(live.average_latency, hist(|a| a.average_latency)),
        max_latency: half(live.max_latency, hist(|a| a.max_latency)),
        average_packet_loss: half(live.average_packet_loss, hist(|a| a.average_packet_loss)),
        average_deviation: half(live.average_deviation, hist(|a| a.average_deviation)),
        sample_count: live.sample_count,
        fallback_count: live.fallback_count,
        method: StatsMethod::Blended,
    }
}
