// Exact statistics over a set of samples. Shared by the compactor and the short windows.

use chrono::{DateTime, Utc};

use crate::models::{Sample, StatsMethod, WindowStats};

/// Statistics over one set of samples. All fields fall back to 0 on empty input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub sample_count: u64,
    pub fallback_count: u64,
    pub uptime_percent: f64,
    pub average_latency: f64,
    pub max_latency: f64,
    pub average_packet_loss: f64,
    pub average_deviation: f64,
}

impl Summary {
    pub fn into_window_stats(self) -> WindowStats {
        WindowStats {
            uptime_percent: self.uptime_percent,
            average_latency: self.average_latency,
            max_latency: self.max_latency,
            average_packet_loss: self.average_packet_loss,
            average_deviation: self.average_deviation,
            sample_count: self.sample_count,
            fallback_count: self.fallback_count,
            method: StatsMethod::Exact,
        }
    }
}

/// Latency and loss only count for alive samples; deviation is measured against the same mean.
pub fn summarize<'a, I>(samples: I) -> Summary
where
    I: IntoIterator<Item = &'a Sample>,
{
    let mut sample_count: u64 = 0;
    let mut fallback_count: u64 = 0;
    let mut alive_count: u64 = 0;
    let mut latencies: Vec<f64> = Vec::new();
    let mut losses: Vec<f64> = Vec::new();

    for s in samples {
        sample_count += 1;
        if s.used_fallback {
            fallback_count += 1;
        }
        if !s.alive {
            continue;
        }
        alive_count += 1;
        if let Some(latency) = s.latency_ms {
            latencies.push(latency);
        }
        if let Some(loss) = s.packet_loss {
            losses.push(loss);
        }
    }

    let uptime_percent = if sample_count == 0 {
        0.0
    } else {
        100.0 * alive_count as f64 / sample_count as f64
    };
    let average_latency = mean(&latencies);
    let max_latency = if latencies.is_empty() {
        0.0
    } else {
        latencies.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    };
    let deviations: Vec<f64> = latencies
        .iter()
        .map(|l| (l - average_latency).abs())
        .collect();

    Summary {
        sample_count,
        fallback_count,
        uptime_percent,
        average_latency,
        max_latency,
        average_packet_loss: mean(&losses),
        average_deviation: mean(&deviations),
    }
}

/// Exact stats over buffer samples with `timestamp >= since`.
pub fn exact_window(samples: &[Sample], since: DateTime<Utc>) -> WindowStats {
    summarize(samples.iter().filter(|s| s.timestamp >= since)).into_window_stats()
}

pub(crate) fn mean(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().sum::<f64>() / (v.len() as f64)
}
