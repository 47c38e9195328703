//! Application configuration structures.

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::collector::ClusterConfig;

use super::validation::{ConfigError, expand_env_vars, parse_listen_address};

// =============================================================================
// Constants
// =============================================================================

/// Default listen address (all interfaces, port 9482).
pub const DEFAULT_LISTEN_ADDRESS: &str = ":9482";

/// Default telemetry path.
pub const DEFAULT_TELEMETRY_PATH: &str = "/metrics";

// =============================================================================
// Server Configuration
// =============================================================================

/// Web server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to expose metrics and the landing page on (default: ":9482").
    pub listen_address: String,

    /// Path under which metrics are exposed (default: "/metrics").
    pub telemetry_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            telemetry_path: DEFAULT_TELEMETRY_PATH.to_string(),
        }
    }
}

impl ServerConfig {
    /// Resolve the listen address.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` if the address cannot be resolved.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_listen_address(&self.listen_address)
    }
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Web server configuration.
    pub server: ServerConfig,

    /// Upstream cluster configuration.
    pub cluster: ClusterConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// `${VAR}` and `${VAR:-default}` in the cluster URL are expanded.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read, parsed, or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Self = serde_yaml::from_str(&content)?;
        config.cluster.url = expand_env_vars(&config.cluster.url);
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` if any field is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate listen address
        self.server.socket_addr()?;

        // Validate telemetry path
        let path = &self.server.telemetry_path;
        if !path.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "telemetry path must start with '/': '{}'",
                path
            )));
        }
        if path.contains(['{', '}'])
            || path
                .split('/')
                .any(|segment| segment.starts_with([':', '*']))
        {
            return Err(ConfigError::ValidationError(format!(
                "telemetry path must be a literal route without ':', '*', '{{' or '}}' segments: '{}'",
                path
            )));
        }
        if path == "/" || path == "/healthz" {
            return Err(ConfigError::ValidationError(format!(
                "telemetry path '{}' collides with the landing page or liveness probe",
                path
            )));
        }

        // Validate cluster URL
        let url = reqwest::Url::parse(&self.cluster.url).map_err(|e| {
            ConfigError::ValidationError(format!(
                "invalid cluster url '{}': {}",
                self.cluster.url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "cluster url must use http or https: '{}'",
                self.cluster.url
            )));
        }

        // Validate timeout
        if self.cluster.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::ValidationError(
                "cluster timeout must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_address, ":9482");
        assert_eq!(config.telemetry_path, "/metrics");
        assert_eq!(config.socket_addr().unwrap().port(), 9482);
    }

    #[test]
    fn test_config_validation_default() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_telemetry_path() {
        let mut config = AppConfig::default();
        config.server.telemetry_path = "metrics".to_string();
        assert!(config.validate().is_err());

        config.server.telemetry_path = "/".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("landing page"));

        config.server.telemetry_path = "/healthz".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_route_patterns() {
        let mut config = AppConfig::default();
        for path in ["/:metrics", "/prom/*rest", "/{metrics}", "/metrics{", "/a}/b"] {
            config.server.telemetry_path = path.to_string();
            let result = config.validate();
            assert!(
                matches!(result, Err(ConfigError::ValidationError(ref msg)) if msg.contains("literal route")),
                "path {} should be rejected",
                path
            );
        }

        config.server.telemetry_path = "/prom/metrics:v1".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_url() {
        let config = AppConfig {
            cluster: ClusterConfig::new("not a url"),
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("invalid cluster url")
        );

        let config = AppConfig {
            cluster: ClusterConfig::new("ftp://presto/v1/cluster"),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let config = AppConfig {
            cluster: ClusterConfig::default().with_timeout(Duration::ZERO),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_listen_address() {
        let mut config = AppConfig::default();
        config.server.listen_address = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  listen_address: \"127.0.0.1:9999\"\ncluster:\n  url: \"http://${{NONEXISTENT_PRESTO_HOST_67890:-presto}}:8080/v1/cluster\"\n  timeout: 5s"
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.server.listen_address, "127.0.0.1:9999");
        assert_eq!(config.server.telemetry_path, "/metrics");
        assert_eq!(config.cluster.url, "http://presto:8080/v1/cluster");
        assert_eq!(config.cluster.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_load_empty_sections_use_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server: {{}}").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let result = AppConfig::load("/nonexistent/presto-exporter.yaml");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server: [unclosed").unwrap();

        let result = AppConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
