//! Presto Exporter - Prometheus metrics for Presto clusters
//!
//! This crate samples a Presto coordinator's `/v1/cluster` status endpoint
//! and re-exposes its numeric fields as Prometheus gauges. It can be used as
//! a library to register the collector in an existing registry, or run as a
//! standalone binary with the `presto_exporter` executable.
//!
//! # Architecture
//!
//! - **Collector**: metric catalog plus an on-demand fetch-and-translate cycle
//! - **Config**: YAML file, environment and CLI layering
//! - **Server**: Axum scrape endpoint, landing page and liveness probe
//!
//! # Example
//!
//! ```rust,ignore
//! use presto_exporter::{ClusterCollector, ClusterConfig, MetricCatalog};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let collector = ClusterCollector::new(
//!         ClusterConfig::new("http://presto:8080/v1/cluster"),
//!         MetricCatalog::presto_cluster()?,
//!     )?;
//!     prometheus::register(Box::new(collector))?;
//!     Ok(())
//! }
//! ```

pub mod collector;
pub mod config;
pub mod server;

pub use collector::{
    ClusterCollector, ClusterConfig, ClusterStatus, CollectorError, MetricCatalog, MetricIdentity,
};
pub use config::{AppConfig, ConfigError};
