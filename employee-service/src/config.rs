use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use shared::telemetry::{LogFormat, TelemetrySettings};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    pub rate_limit: RateLimitSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8111,
        }
    }
}

/// Where the upstream employee service lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8112/api/v1/employee".to_string(),
            timeout_secs: 10,
        }
    }
}

impl UpstreamSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Per-IP request budget for the public routes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    pub per_second: u64,
    pub burst_size: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            per_second: 2,
            burst_size: 10,
        }
    }
}

/// Where [`ServiceConfig::load`] found its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    Defaults,
}

impl ServiceConfig {
    /// Reads the TOML file at `path` (defaults if it does not exist), then applies
    /// environment overrides.
    ///
    /// Runs before telemetry is up, so it does not log; the caller reports the source.
    pub fn load(path: &str) -> Result<(Self, ConfigSource), Box<dyn std::error::Error>> {
        let (config, source) = if Path::new(path).exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            (config, ConfigSource::File)
        } else {
            (Self::default(), ConfigSource::Defaults)
        };

        Ok((config.with_overrides(|key| std::env::var(key).ok())?, source))
    }

    /// Applies `EMPLOYEE_SERVICE_BASE_URL`, `SERVER_PORT`, `LOG_FORMAT` and
    /// `OTEL_EXPORTER_OTLP_ENDPOINT` from `lookup`.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(base_url) = lookup("EMPLOYEE_SERVICE_BASE_URL") {
            self.upstream.base_url = base_url;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| format!("SERVER_PORT must be a port number: {e}"))?;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.telemetry.log_format = match format.as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            };
        }
        if let Some(endpoint) = lookup("OTEL_EXPORTER_OTLP_ENDPOINT") {
            self.telemetry.otlp_endpoint = Some(endpoint);
        }
        Ok(self)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();

        assert_eq!(config.server.port, 8111);
        assert_eq!(
            config.upstream.base_url,
            "http://localhost:8112/api/v1/employee"
        );
        assert_eq!(config.upstream.timeout(), Duration::from_secs(10));
        assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
        assert!(config.telemetry.otlp_endpoint.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let raw = r#"
            [upstream]
            base_url = "http://mock:9000/api/v1/employee"

            [telemetry]
            log_format = "json"
        "#;
        let config: ServiceConfig = toml::from_str(raw).unwrap();

        assert_eq!(config.upstream.base_url, "http://mock:9000/api/v1/employee");
        assert_eq!(config.upstream.timeout_secs, 10);
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
        assert_eq!(config.telemetry.filter, "info");
        assert_eq!(config.rate_limit.burst_size, 10);
    }

    #[test]
    fn env_overrides_win_over_file() {
        let config = ServiceConfig::default()
            .with_overrides(|key| match key {
                "EMPLOYEE_SERVICE_BASE_URL" => Some("http://other:1/api".to_string()),
                "SERVER_PORT" => Some("9090".to_string()),
                "LOG_FORMAT" => Some("json".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.upstream.base_url, "http://other:1/api");
        assert_eq!(config.bind_address(), "0.0.0.0:9090");
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_port_override_is_rejected() {
        let output = ServiceConfig::default().with_overrides(|key| {
            (key == "SERVER_PORT").then(|| "not-a-port".to_string())
        });
        assert!(output.is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let (config, source) = ServiceConfig::load("/definitely/not/here/employee.toml").unwrap();
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config.rate_limit.per_second, 2);
    }

    #[test]
    fn existing_file_is_reported_as_source() {
        let path = std::env::temp_dir().join(format!(
            "employee-service-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[rate_limit]\nper_second = 7\n").unwrap();

        let output = ServiceConfig::load(path.to_str().unwrap());
        std::fs::remove_file(&path).unwrap();

        let (config, source) = output.unwrap();
        assert_eq!(source, ConfigSource::File);
        assert_eq!(config.rate_limit.per_second, 7);
    }
}
