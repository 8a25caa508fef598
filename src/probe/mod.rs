// Reachability probing: the transport (`Prober`) and the primary/fallback executor.

mod executor;
mod tcp;

use std::future::Future;

pub use executor::ProbeExecutor;
pub use tcp::TcpProber;

/// What a transport reports for one target. `latency_ms` / `packet_loss` only mean
/// something when `alive`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeOutcome {
    pub alive: bool,
    pub latency_ms: Option<f64>,
    pub packet_loss: Option<f64>,
}

impl ProbeOutcome {
    pub fn unreachable() -> Self {
        Self {
            alive: false,
            latency_ms: None,
            packet_loss: None,
        }
    }

    pub fn reachable(latency_ms: f64, packet_loss: f64) -> Self {
        Self {
            alive: true,
            latency_ms: Some(latency_ms),
            packet_loss: Some(packet_loss),
        }
    }
}

/// The check itself could not be performed. Distinct from a reachable-but-down result.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to resolve {target}: {source}")]
    Resolve {
        target: String,
        #[source]
        source: std::io::Error,
    },
    #[error("resolving {0} timed out")]
    ResolveTimeout(String),
    #[error("{0} resolved to no addresses")]
    NoAddress(String),
}

/// Transport used to check one target.
pub trait Prober: Send + Sync + 'static {
    fn probe(&self, target: &str)
    -> impl Future<Output = Result<ProbeOutcome, ProbeError>> + Send;
}
