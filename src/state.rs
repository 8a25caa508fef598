// Process-wide monitor state: live sample buffer + sealed aggregate history.
//
// Buffer and aggregates sit behind one RwLock. Compaction takes the write lock for the whole
// drain + seal, so an append lands entirely before or after it, and readers never see a
// half-drained buffer or an aggregate without its samples removed.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::compactor::aggregate_samples;
use crate::metrics::{self, Window};
use crate::models::{Aggregate, Sample, StatsReport, Totals, WindowStats};

pub struct MonitorState {
    started_at: DateTime<Utc>,
    process_start: Instant,
    inner: RwLock<Inner>,
}

struct Inner {
    buffer: Vec<Sample>,
    aggregates: Vec<Aggregate>,
    /// Start of the interval the buffer currently covers.
    interval_start: DateTime<Utc>,
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorState {
    pub fn new() -> Self {
        Self::with_start(Utc::now())
    }

    /// State whose wall-clock start is `started_at` (tests build histories from a fixed origin).
    pub fn with_start(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            process_start: Instant::now(),
            inner: RwLock::new(Inner {
                buffer: Vec::new(),
                aggregates: Vec::new(),
                interval_start: started_at,
            }),
        }
    }

    // Every critical section leaves Inner consistent, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn process_start(&self) -> Instant {
        self.process_start
    }

    /// Monotonic time since this state was created.
    pub fn uptime(&self) -> Duration {
        self.process_start.elapsed()
    }

    pub fn append(&self, sample: Sample) {
        self.write().buffer.push(sample);
    }

    pub fn buffer_len(&self) -> usize {
        self.read().buffer.len()
    }

    pub fn buffer(&self) -> Vec<Sample> {
        self.read().buffer.clone()
    }

    pub fn aggregate_count(&self) -> usize {
        self.read().aggregates.len()
    }

    pub fn aggregates(&self) -> Vec<Aggregate> {
        self.read().aggregates.clone()
    }

    pub fn compact(&self) -> Aggregate {
        self.compact_at(Utc::now())
    }

    /// Folds the whole buffer into the next aggregate and empties it, under one write lock.
    pub fn compact_at(&self, sealed_at: DateTime<Utc>) -> Aggregate {
        let mut inner = self.write();
        let samples = std::mem::take(&mut inner.buffer);
        let index = inner.aggregates.len() as u64 + 1;
        let aggregate = aggregate_samples(&samples, index, inner.interval_start, sealed_at);
        inner.aggregates.push(aggregate.clone());
        inner.interval_start = sealed_at;
        aggregate
    }

    pub fn query(&self, window: Window) -> WindowStats {
        self.query_at(window, Utc::now())
    }

    pub fn query_at(&self, window: Window, now: DateTime<Utc>) -> WindowStats {
        let inner = self.read();
        metrics::query(&inner.buffer, &inner.aggregates, window, now)
    }

    pub fn totals(&self) -> Totals {
        let inner = self.read();
        metrics::totals(&inner.buffer, &inner.aggregates)
    }

    pub fn report(&self) -> StatsReport {
        self.report_at(Utc::now())
    }

    /// All windows, totals, and history from a single read of the state.
    pub fn report_at(&self, now: DateTime<Utc>) -> StatsReport {
        let inner = self.read();
        StatsReport {
            started_at: self.started_at,
            generated_at: now,
            windows: metrics::query_all(&inner.buffer, &inner.aggregates, now),
            totals: metrics::totals(&inner.buffer, &inner.aggregates),
            buffer_len: inner.buffer.len(),
            aggregates: inner.aggregates.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn compaction_drains_buffer_into_aggregate() {
        let t0 = Utc::now();
        let state = MonitorState::with_start(t0);
        state.append(Sample::alive(t0 + TimeDelta::seconds(1), 12.0, 0.0));
        state.append(Sample::dead(t0 + TimeDelta::seconds(2)).via_fallback());

        let agg = state.compact_at(t0 + TimeDelta::seconds(3));
        assert_eq!(agg.index, 1);
        assert_eq!(agg.sample_count, 2);
        assert_eq!(agg.fallback_count, 1);
        assert_eq!(agg.started_at, t0);
        assert_eq!(state.buffer_len(), 0);
        assert_eq!(state.aggregates(), vec![agg]);
    }

    #[test]
    fn indices_are_contiguous_from_one() {
        let state = MonitorState::new();
        for _ in 0..5 {
            state.compact();
        }
        let indices: Vec<u64> = state.aggregates().iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn next_interval_starts_at_previous_seal() {
        let t0 = Utc::now();
        let state = MonitorState::with_start(t0);
        let first = state.compact_at(t0 + TimeDelta::minutes(60));
        let second = state.compact_at(t0 + TimeDelta::minutes(120));
        assert_eq!(second.started_at, first.sealed_at);
    }
}
