// Windowed metrics: exact stats over the live buffer for short windows, blended estimates
// against sealed aggregates for windows that outlive the buffer.

pub mod blend;
pub mod exact;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Aggregate, Sample, Totals, WindowSet, WindowStats};

pub use blend::{BlendScope, MIN_AGGREGATES_FOR_BLEND, RECENT_AGGREGATES, blend};
pub use exact::{Summary, exact_window, summarize};

/// Trailing windows the engine answers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Window {
    TenMinutes,
    OneHour,
    TwentyFourHours,
    Lifetime,
}

impl Window {
    pub const ALL: [Window; 4] = [
        Window::TenMinutes,
        Window::OneHour,
        Window::TwentyFourHours,
        Window::Lifetime,
    ];

    /// Span of buffer samples read for the exact (or live) part of the window.
    /// Lifetime reuses the 24-hour span; older history only enters through aggregates.
    pub fn live_span(self) -> TimeDelta {
        match self {
            Window::TenMinutes => TimeDelta::minutes(10),
            Window::OneHour => TimeDelta::hours(1),
            Window::TwentyFourHours | Window::Lifetime => TimeDelta::hours(24),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Window::TenMinutes => "10 minutes",
            Window::OneHour => "1 hour",
            Window::TwentyFourHours => "24 hours",
            Window::Lifetime => "lifetime",
        }
    }
}

/// Stats for `window` as of `now`. Never fails; empty input yields zeros.
pub fn query(
    buffer: &[Sample],
    aggregates: &[Aggregate],
    window: Window,
    now: DateTime<Utc>,
) -> WindowStats {
    let live = exact_window(buffer, now - window.live_span());
    let scope = match window {
        Window::TenMinutes | Window::OneHour => return live,
        Window::TwentyFourHours => BlendScope::Recent,
        Window::Lifetime => BlendScope::AllTime,
    };
    if aggregates.len() < MIN_AGGREGATES_FOR_BLEND {
        // Warm-up: not enough history yet, buffer-only figure.
        return live;
    }
    blend(&live, aggregates, scope)
}

pub fn query_all(buffer: &[Sample], aggregates: &[Aggregate], now: DateTime<Utc>) -> WindowSet {
    WindowSet {
        ten_minutes: query(buffer, aggregates, Window::TenMinutes, now),
        one_hour: query(buffer, aggregates, Window::OneHour, now),
        twenty_four_hours: query(buffer, aggregates, Window::TwentyFourHours, now),
        lifetime: query(buffer, aggregates, Window::Lifetime, now),
    }
}

/// Exact sums across the buffer and every aggregate. Not blended: sums lose nothing across
/// a compaction boundary.
pub fn totals(buffer: &[Sample], aggregates: &[Aggregate]) -> Totals {
    let live_retries = buffer.iter().filter(|s| s.used_fallback).count() as u64;
    aggregates.iter().fold(
        Totals {
            total_probes: buffer.len() as u64,
            total_retries: live_retries,
        },
        |acc, a| Totals {
            total_probes: acc.total_probes + a.sample_count,
            total_retries: acc.total_retries + a.fallback_count,
        },
    )
}
