//! Configuration module for the exporter.
//!
//! Provides YAML-based configuration loading and validation for:
//! - Server settings (listen address, telemetry path)
//! - Upstream cluster settings (status URL, request timeout)
//!
//! CLI flags and environment variables are layered on top in the binary.

mod app;
mod validation;

pub use app::{AppConfig, ServerConfig};
pub use validation::{ConfigError, expand_env_vars, parse_duration, parse_listen_address};

// Re-export constants
pub use app::{DEFAULT_LISTEN_ADDRESS, DEFAULT_TELEMETRY_PATH};
