// Probe executor: primary/fallback decision and transport-failure handling

mod common;

use common::{ScriptedProber, transport_failure};
use pingwatch::probe::{ProbeExecutor, ProbeOutcome};
use pingwatch::state::MonitorState;

const PRIMARY: &str = "primary.test:443";
const FALLBACK: &str = "fallback.test:443";

#[tokio::test]
async fn primary_up_records_primary_only() {
    let prober = ScriptedProber::always_up().push(PRIMARY, Ok(ProbeOutcome::reachable(12.5, 25.0)));
    let calls = prober.calls.clone();
    let executor = ProbeExecutor::new(prober, PRIMARY, FALLBACK);

    let sample = executor.execute_probe().await.expect("sample");
    assert!(sample.alive);
    assert!(!sample.used_fallback);
    assert_eq!(sample.latency_ms, Some(12.5));
    assert_eq!(sample.packet_loss, Some(25.0));
    assert_eq!(*calls.lock().unwrap(), vec![PRIMARY.to_string()]);
}

#[tokio::test]
async fn primary_down_records_fallback_outcome() {
    let prober = ScriptedProber::always_up()
        .push(PRIMARY, Ok(ProbeOutcome::unreachable()))
        .push(FALLBACK, Ok(ProbeOutcome::reachable(30.0, 0.0)));
    let calls = prober.calls.clone();
    let executor = ProbeExecutor::new(prober, PRIMARY, FALLBACK);

    let sample = executor.execute_probe().await.expect("sample");
    assert!(sample.alive);
    assert!(sample.used_fallback);
    assert_eq!(sample.latency_ms, Some(30.0));
    assert_eq!(
        *calls.lock().unwrap(),
        vec![PRIMARY.to_string(), FALLBACK.to_string()]
    );
}

#[tokio::test]
async fn both_down_records_dead_fallback_sample_without_more_retries() {
    let prober = ScriptedProber::new(ProbeOutcome::unreachable());
    let calls = prober.calls.clone();
    let executor = ProbeExecutor::new(prober, PRIMARY, FALLBACK);

    let sample = executor.execute_probe().await.expect("sample");
    assert!(!sample.alive);
    assert!(sample.used_fallback);
    assert_eq!(sample.latency_ms, None);
    assert_eq!(sample.packet_loss, None);
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn transport_failure_on_primary_produces_no_sample() {
    let prober = ScriptedProber::always_up().push(PRIMARY, transport_failure(PRIMARY));
    let calls = prober.calls.clone();
    let executor = ProbeExecutor::new(prober, PRIMARY, FALLBACK);
    let state = MonitorState::new();

    assert!(!executor.run_tick(&state).await);
    assert_eq!(state.buffer_len(), 0);
    assert_eq!(*calls.lock().unwrap(), vec![PRIMARY.to_string()]);
}

#[tokio::test]
async fn transport_failure_on_fallback_produces_no_sample() {
    let prober = ScriptedProber::always_up()
        .push(PRIMARY, Ok(ProbeOutcome::unreachable()))
        .push(FALLBACK, transport_failure(FALLBACK));
    let executor = ProbeExecutor::new(prober, PRIMARY, FALLBACK);
    let state = MonitorState::new();

    assert!(!executor.run_tick(&state).await);
    assert_eq!(state.buffer_len(), 0);
}

#[tokio::test]
async fn run_tick_appends_one_sample() {
    let executor = ProbeExecutor::new(ScriptedProber::always_up(), PRIMARY, FALLBACK);
    let state = MonitorState::new();
    assert!(executor.run_tick(&state).await);
    assert!(executor.run_tick(&state).await);
    assert_eq!(state.buffer_len(), 2);
}
