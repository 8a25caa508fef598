// TCP connect prober: N connect attempts per probe, each bounded by a timeout.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::{Instant, timeout};
use tracing::{instrument, trace};

use super::{ProbeError, ProbeOutcome, Prober};

pub struct TcpProber {
    attempts: u32,
    timeout: Duration,
}

impl TcpProber {
    pub fn new(attempts: u32, timeout: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            timeout,
        }
    }

    async fn resolve(&self, target: &str) -> Result<SocketAddr, ProbeError> {
        let mut addrs = timeout(self.timeout, tokio::net::lookup_host(target))
            .await
            .map_err(|_| ProbeError::ResolveTimeout(target.to_string()))?
            .map_err(|source| ProbeError::Resolve {
                target: target.to_string(),
                source,
            })?;
        addrs
            .next()
            .ok_or_else(|| ProbeError::NoAddress(target.to_string()))
    }
}

/// Alive if any attempt connected; latency is the mean RTT of those that did.
pub(super) fn outcome_from_rtts(rtts_ms: &[f64], attempts: u32) -> ProbeOutcome {
    if rtts_ms.is_empty() {
        return ProbeOutcome::unreachable();
    }
    let attempts = attempts.max(1) as f64;
    let latency = rtts_ms.iter().sum::<f64>() / rtts_ms.len() as f64;
    let lost = attempts - rtts_ms.len() as f64;
    ProbeOutcome::reachable(latency, 100.0 * lost / attempts)
}

impl Prober for TcpProber {
    #[instrument(skip_all, fields(probe_target = %target, attempts = self.attempts))]
    async fn probe(&self, target: &str) -> Result<ProbeOutcome, ProbeError> {
        let addr = self.resolve(target).await?;
        let mut rtts_ms = Vec::with_capacity(self.attempts as usize);
        for attempt in 0..self.attempts {
            let start = Instant::now();
            match timeout(self.timeout, TcpStream::connect(addr)).await {
                Ok(Ok(_stream)) => rtts_ms.push(start.elapsed().as_secs_f64() * 1000.0),
                Ok(Err(e)) => trace!(attempt, %addr, error = %e, "connect failed"),
                Err(_) => trace!(attempt, %addr, "connect timed out"),
            }
        }
        Ok(outcome_from_rtts(&rtts_ms, self.attempts))
    }
}
