//! Collector Layer
//!
//! Translates upstream status documents into Prometheus metric families on
//! demand. Nothing is polled in the background: each scrape of the metrics
//! endpoint triggers one fetch, one decode and one emission.
//!
//! # Architecture
//!
//! - [`MetricCatalog`]: fixed, ordered metric identities (`describe`)
//! - [`ClusterStatus`]: per-scrape snapshot of the upstream document
//! - [`ClusterCollector`]: `prometheus::core::Collector` tying both together
//!
//! # Example
//!
//! ```rust,no_run
//! use presto_exporter::collector::{ClusterCollector, ClusterConfig, MetricCatalog};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = MetricCatalog::presto_cluster()?;
//! let collector = ClusterCollector::new(ClusterConfig::default(), catalog)?;
//!
//! let registry = prometheus::Registry::new();
//! registry.register(Box::new(collector))?;
//! let families = registry.gather();
//! # Ok(())
//! # }
//! ```

mod catalog;
pub mod cluster;
mod error;
mod status;

pub use catalog::{FieldAccessor, MetricCatalog, MetricIdentity, NAMESPACE};
pub use cluster::{ClusterCollector, ClusterConfig};
pub use error::CollectorError;
pub use status::ClusterStatus;
