use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("upstream.base_url must not be empty")]
    EmptyBaseUrl,
    #[error("upstream.dashboard_path must start with '/', got {0:?}")]
    RelativeDashboardPath(String),
    #[error("upstream.timeout_secs must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub query: QuerySettings,
    #[serde(default)]
    pub widgets: WidgetSources,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub base_url: String,
    #[serde(default = "default_dashboard_path")]
    pub dashboard_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl UpstreamSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct QuerySettings {
    #[serde(default = "default_stale_time_secs")]
    pub stale_time_secs: u64,
}

impl QuerySettings {
    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_secs)
    }
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            stale_time_secs: default_stale_time_secs(),
        }
    }
}

/// Where each child widget loads its own content from.
#[derive(Debug, Deserialize, Clone)]
pub struct WidgetSources {
    #[serde(default = "default_manual_scan_url")]
    pub manual_scan_url: String,
    #[serde(default = "default_security_overview_url")]
    pub security_overview_url: String,
    #[serde(default = "default_open_ports_url")]
    pub open_ports_url: String,
    #[serde(default = "default_cves_url")]
    pub cves_url: String,
}

impl Default for WidgetSources {
    fn default() -> Self {
        Self {
            manual_scan_url: default_manual_scan_url(),
            security_overview_url: default_security_overview_url(),
            open_ports_url: default_open_ports_url(),
            cves_url: default_cves_url(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_dashboard_path() -> String {
    "/api/dashboard".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_stale_time_secs() -> u64 {
    30
}

fn default_manual_scan_url() -> String {
    "/widgets/manual-scan".to_string()
}

fn default_security_overview_url() -> String {
    "/widgets/security-overview".to_string()
}

fn default_open_ports_url() -> String {
    "/widgets/open-ports".to_string()
}

fn default_cves_url() -> String {
    "/widgets/cves".to_string()
}

/// Load `config/dashboard.*`, overridden by `POSTURE_*` environment
/// variables (nested keys joined with `__`, e.g. `POSTURE_UPSTREAM__BASE_URL`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("POSTURE")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    parse_config(settings)
}

pub fn parse_config(settings: config::Config) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = settings.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.upstream.base_url.trim().is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }
    if !config.upstream.dashboard_path.starts_with('/') {
        return Err(ConfigError::RelativeDashboardPath(
            config.upstream.dashboard_path.clone(),
        ));
    }
    if config.upstream.timeout_secs == 0 {
        return Err(ConfigError::ZeroTimeout);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn parse(toml: &str) -> Result<AppConfig, ConfigError> {
        let settings = config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        parse_config(settings)
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = parse(
            r#"
            [upstream]
            base_url = "http://scanner:5000"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.upstream.dashboard_path, "/api/dashboard");
        assert_eq!(config.upstream.timeout(), Duration::from_secs(10));
        assert_eq!(config.query.stale_time(), Duration::from_secs(30));
        assert_eq!(config.widgets.cves_url, "/widgets/cves");
    }

    #[test]
    fn test_explicit_values() {
        let config = parse(
            r#"
            [server]
            bind_addr = "127.0.0.1:9000"

            [upstream]
            base_url = "http://scanner:5000"
            dashboard_path = "/v2/dashboard"
            timeout_secs = 3

            [query]
            stale_time_secs = 0

            [widgets]
            open_ports_url = "http://scanner:5000/widgets/ports"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.upstream.dashboard_path, "/v2/dashboard");
        assert_eq!(config.upstream.timeout_secs, 3);
        assert_eq!(config.query.stale_time(), Duration::ZERO);
        assert_eq!(
            config.widgets.open_ports_url,
            "http://scanner:5000/widgets/ports"
        );
        assert_eq!(config.widgets.manual_scan_url, "/widgets/manual-scan");
    }

    #[test]
    fn test_missing_upstream_is_an_error() {
        let err = parse("[server]\nbind_addr = \"0.0.0.0:1\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_validation() {
        let err = parse("[upstream]\nbase_url = \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyBaseUrl));

        let err = parse("[upstream]\nbase_url = \"http://x\"\ndashboard_path = \"api\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::RelativeDashboardPath(p) if p == "api"));

        let err = parse("[upstream]\nbase_url = \"http://x\"\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout));
    }
}
