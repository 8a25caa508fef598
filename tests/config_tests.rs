// Config loading and validation tests

use pingwatch::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 3000
host = "0.0.0.0"

[probe]
primary_target = "google.com:443"
fallback_target = "1.1.1.1:443"
interval_ms = 5000
timeout_ms = 2000
attempts = 4

[compaction]
interval_secs = 3600

[report]
dir = "reports"
checkpoints_secs = [3600, 86400]

[monitoring]
stats_log_interval_secs = 60
"#;

const MINIMAL_CONFIG: &str = r#"
[server]
port = 3000
host = "127.0.0.1"

[probe]
primary_target = "google.com:443"
fallback_target = "1.1.1.1:443"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.probe.primary_target, "google.com:443");
    assert_eq!(config.probe.fallback_target, "1.1.1.1:443");
    assert_eq!(config.probe.attempts, 4);
    assert_eq!(config.compaction.interval_secs, 3600);
    assert_eq!(config.report.checkpoints_secs, vec![3600, 86400]);
    assert!(config.report.enabled);
}

#[test]
fn test_config_defaults_when_omitted() {
    let config = AppConfig::load_from_str(MINIMAL_CONFIG).expect("minimal");
    assert_eq!(config.probe.interval_ms, 5000);
    assert_eq!(config.probe.timeout_ms, 2000);
    assert_eq!(config.probe.attempts, 4);
    assert_eq!(config.compaction.interval_secs, 3600);
    assert_eq!(config.report.dir, "reports");
    assert_eq!(config.report.checkpoints_secs.len(), 4);
    assert_eq!(config.monitoring.stats_log_interval_secs, 60);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 3000", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_primary() {
    let bad = VALID_CONFIG.replace("primary_target = \"google.com:443\"", "primary_target = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("probe.primary_target"));
}

#[test]
fn test_config_validation_rejects_same_fallback() {
    let bad = VALID_CONFIG.replace("1.1.1.1:443", "google.com:443");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("probe.fallback_target"));
}

#[test]
fn test_config_validation_rejects_probe_interval_zero() {
    let bad = VALID_CONFIG.replace("interval_ms = 5000", "interval_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("probe.interval_ms"));
}

#[test]
fn test_config_validation_rejects_attempts_out_of_range() {
    let bad = VALID_CONFIG.replace("attempts = 4", "attempts = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("probe.attempts"));

    let bad = VALID_CONFIG.replace("attempts = 4", "attempts = 101");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("probe.attempts"));
}

#[test]
fn test_config_validation_rejects_compaction_interval_zero() {
    let bad = VALID_CONFIG.replace("interval_secs = 3600", "interval_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("compaction.interval_secs"));
}

#[test]
fn test_config_validation_rejects_zero_checkpoint() {
    let bad = VALID_CONFIG.replace("[3600, 86400]", "[0, 86400]");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("report.checkpoints_secs"));
}

#[test]
fn test_config_validation_rejects_stats_log_interval_zero() {
    let bad = VALID_CONFIG.replace(
        "stats_log_interval_secs = 60",
        "stats_log_interval_secs = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("stats_log_interval_secs"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_rejects_missing_probe_section() {
    let err = AppConfig::load_from_str("[server]\nport = 1\nhost = \"x\"\n").unwrap_err();
    assert!(err.to_string().contains("probe"));
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.probe.primary_target, "google.com:443");
}

#[test]
fn test_config_validation_rejects_oversized_compaction_interval() {
    let bad = VALID_CONFIG.replace("interval_secs = 3600", "interval_secs = 9223372036854775807");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("compaction.interval_secs"));
}

#[test]
fn test_config_validation_rejects_oversized_checkpoint() {
    let bad = VALID_CONFIG.replace("[3600, 86400]", "[3600, 9223372036854775807]");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("report.checkpoints_secs"));
}

#[test]
fn test_config_accepts_schedule_at_cap() {
    let at_cap = format!("interval_secs = {}", pingwatch::config::MAX_SCHEDULE_SECS);
    let ok = VALID_CONFIG.replace("interval_secs = 3600", &at_cap);
    let config = AppConfig::load_from_str(&ok).expect("at cap");
    assert_eq!(
        config.compaction.interval_secs,
        pingwatch::config::MAX_SCHEDULE_SECS
    );
}
