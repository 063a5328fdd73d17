use serde::Deserialize;

/// Application configuration
///
/// Every section falls back to its defaults field by field, so a file that
/// only sets `server.port` keeps the default host.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub scoring: ScoringConfig,
    pub client: ClientConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where the scoring artifact is loaded from at startup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub artifact_path: String,
}

/// Settings for the interactive client commands
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_url: String,
    /// Bound on a single prediction call
    pub timeout_secs: u64,
    /// Bound on the health check that gates predictions
    pub health_timeout_secs: u64,
    /// Directory valuation reports are written to
    pub export_dir: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub tracing: TracingConfig,
    pub metrics: MetricsConfig,
}

/// OpenTelemetry span export
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    pub enabled: bool,
    /// OTLP gRPC collector, e.g. http://localhost:4317
    pub otlp_endpoint: String,
    pub service_name: String,
    /// Fraction of traces kept, 0.0 to 1.0
    pub sampling_ratio: f64,
}

/// Prometheus scrape endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            artifact_path: "artifacts/car_price_model.json".to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 15,
            health_timeout_secs: 3,
            export_dir: ".".to_string(),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: "http://localhost:4317".to_string(),
            service_name: "car-valuation".to_string(),
            sampling_ratio: 1.0,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::{Config, File, FileFormat};

    use super::*;

    fn from_toml(source: &str) -> Result<AppConfig, config::ConfigError> {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.scoring.artifact_path, "artifacts/car_price_model.json");
        assert_eq!(config.client.timeout_secs, 15);
        assert_eq!(config.client.health_timeout_secs, 3);
        assert!(matches!(config.logging.format, LogFormat::Pretty));
        assert!(!config.observability.tracing.enabled);
        assert_eq!(config.observability.tracing.service_name, "car-valuation");
        assert_eq!(config.observability.metrics.path, "/metrics");
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"client": {"api_url": "http://example:9000"}, "logging": {"level": "debug", "format": "json"}}"#,
        )
        .unwrap();

        assert_eq!(config.client.api_url, "http://example:9000");
        assert_eq!(config.client.timeout_secs, 15);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(matches!(config.logging.format, LogFormat::Json));
        assert!(config.observability.metrics.enabled);
    }

    #[test]
    fn test_port_only_server_section_keeps_other_settings() {
        let config = from_toml(
            r#"
            [server]
            port = 9000

            [scoring]
            artifact_path = "/models/m.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.scoring.artifact_path, "/models/m.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_observability_sections() {
        let config = from_toml(
            r#"
            [observability.tracing]
            enabled = true

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert!(config.observability.tracing.enabled);
        assert_eq!(config.observability.tracing.otlp_endpoint, "http://localhost:4317");
        assert!(config.observability.metrics.enabled);
        assert_eq!(config.logging.level, "info");
        assert!(matches!(config.logging.format, LogFormat::Json));
    }

    #[test]
    fn test_malformed_value_is_reported() {
        let result = from_toml(
            r#"
            [server]
            port = "not-a-port"
            "#,
        );

        assert!(result.is_err());
    }
}
