use serde::Deserialize;

/// Upper bound for compaction periods and report checkpoints (one year).
pub const MAX_SCHEDULE_SECS: u64 = 365 * 86_400;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub probe: ProbeConfig,
    #[serde(default)]
    pub compaction: CompactionConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Directory of static dashboard files served at `/`. Unset: plain-text banner.
    #[serde(default)]
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// `host:port` checked every tick.
    pub primary_target: String,
    /// `host:port` checked once when the primary is down.
    pub fallback_target: String,
    #[serde(default = "default_probe_interval_ms")]
    pub interval_ms: u64,
    /// Per-attempt bound for resolve and connect.
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect attempts per probe; packet loss is measured over these.
    #[serde(default = "default_probe_attempts")]
    pub attempts: u32,
}

fn default_probe_interval_ms() -> u64 {
    5000
}

fn default_probe_timeout_ms() -> u64 {
    2000
}

fn default_probe_attempts() -> u32 {
    4
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompactionConfig {
    #[serde(default = "default_compaction_interval_secs")]
    pub interval_secs: u64,
}

impl Default for CompactionConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_compaction_interval_secs(),
        }
    }
}

fn default_compaction_interval_secs() -> u64 {
    3600
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_report_dir")]
    pub dir: String,
    /// Elapsed process time (seconds) at which a report snapshot is written.
    #[serde(default = "default_checkpoints_secs")]
    pub checkpoints_secs: Vec<u64>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_report_dir(),
            checkpoints_secs: default_checkpoints_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_report_dir() -> String {
    "reports".into()
}

fn default_checkpoints_secs() -> Vec<u64> {
    vec![3600, 6 * 3600, 24 * 3600, 7 * 24 * 3600]
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// How often to log app stats (tick counters, buffer size) at INFO level.
    #[serde(default = "default_stats_log_interval_secs")]
    pub stats_log_interval_secs: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            stats_log_interval_secs: default_stats_log_interval_secs(),
        }
    }
}

fn default_stats_log_interval_secs() -> u64 {
    60
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            self.server.static_dir.as_deref().is_none_or(|d| !d.is_empty()),
            "server.static_dir must be non-empty when set"
        );
        anyhow::ensure!(
            !self.probe.primary_target.is_empty(),
            "probe.primary_target must be non-empty"
        );
        anyhow::ensure!(
            !self.probe.fallback_target.is_empty(),
            "probe.fallback_target must be non-empty"
        );
        anyhow::ensure!(
            self.probe.primary_target != self.probe.fallback_target,
            "probe.fallback_target must differ from probe.primary_target ({})",
            self.probe.primary_target
        );
        anyhow::ensure!(
            self.probe.interval_ms > 0,
            "probe.interval_ms must be > 0, got {}",
            self.probe.interval_ms
        );
        anyhow::ensure!(
            self.probe.timeout_ms > 0,
            "probe.timeout_ms must be > 0, got {}",
            self.probe.timeout_ms
        );
        anyhow::ensure!(
            (1..=100).contains(&self.probe.attempts),
            "probe.attempts must be between 1 and 100, got {}",
            self.probe.attempts
        );
        anyhow::ensure!(
            (1..=MAX_SCHEDULE_SECS).contains(&self.compaction.interval_secs),
            "compaction.interval_secs must be between 1 and {}, got {}",
            MAX_SCHEDULE_SECS,
            self.compaction.interval_secs
        );
        anyhow::ensure!(!self.report.dir.is_empty(), "report.dir must be non-empty");
        anyhow::ensure!(
            self.report
                .checkpoints_secs
                .iter()
                .all(|s| (1..=MAX_SCHEDULE_SECS).contains(s)),
            "report.checkpoints_secs entries must be between 1 and {}, got {:?}",
            MAX_SCHEDULE_SECS,
            self.report.checkpoints_secs
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        Ok(())
    }
}
