//! Presto cluster collectors.
//!
//! - [`ClusterCollector`]: `/v1/cluster` status gauges

mod collector;

pub use collector::{ClusterCollector, ClusterConfig, DEFAULT_URL};
