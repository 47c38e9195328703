//! Metric catalog.
//!
//! The catalog is the fixed, ordered list of metric identities the exporter
//! can produce. It is built once at startup and handed to the collector, so
//! tests can swap in a different table without touching globals.

use std::collections::HashMap;

use prometheus::core::Desc;
use prometheus::proto::{Gauge, Metric, MetricFamily, MetricType};

use super::error::CollectorError;
use super::status::ClusterStatus;

/// Namespace prefix shared by every exported metric.
pub const NAMESPACE: &str = "presto_cluster";

/// Selects the snapshot field backing one metric.
pub type FieldAccessor = fn(&ClusterStatus) -> f64;

/// Built-in table: metric suffix, help text, snapshot field.
const PRESTO_CLUSTER_METRICS: [(&str, &str, FieldAccessor); 9] = [
    (
        "running_queries",
        "Running requests of the presto cluster.",
        |s| s.running_queries,
    ),
    (
        "blocked_queries",
        "Blocked queries of the presto cluster.",
        |s| s.blocked_queries,
    ),
    (
        "queued_queries",
        "Queued queries of the presto cluster.",
        |s| s.queued_queries,
    ),
    (
        "active_workers",
        "Active workers of the presto cluster.",
        |s| s.active_workers,
    ),
    (
        "running_drivers",
        "Running drivers of the presto cluster.",
        |s| s.running_drivers,
    ),
    (
        "reserved_memory",
        "Reserved memory of the presto cluster.",
        |s| s.reserved_memory,
    ),
    (
        "total_input_rows",
        "Total input rows of the presto cluster.",
        |s| s.total_input_rows,
    ),
    (
        "total_input_bytes",
        "Total input bytes of the presto cluster.",
        |s| s.total_input_bytes,
    ),
    (
        "total_cpu_time_secs",
        "Total cpu time of the presto cluster.",
        |s| s.total_cpu_time_secs,
    ),
];

/// Externally visible identity of one metric.
///
/// Identities carry no labels: each one is a single global gauge series.
#[derive(Debug, Clone)]
pub struct MetricIdentity {
    desc: Desc,
    value: FieldAccessor,
}

impl MetricIdentity {
    /// Create an identity from a fully qualified name and help text.
    ///
    /// # Errors
    /// Returns `CollectorError::Config` if the name is not a valid metric name
    /// or the help text is empty.
    pub fn new(
        fq_name: impl Into<String>,
        help: impl Into<String>,
        value: FieldAccessor,
    ) -> Result<Self, CollectorError> {
        let desc = Desc::new(fq_name.into(), help.into(), Vec::new(), HashMap::new())?;
        Ok(Self { desc, value })
    }

    /// Fully qualified metric name.
    pub fn name(&self) -> &str {
        &self.desc.fq_name
    }

    /// Help text.
    pub fn help(&self) -> &str {
        &self.desc.help
    }

    /// Prometheus descriptor advertised during registration.
    pub fn desc(&self) -> &Desc {
        &self.desc
    }

    /// Read this metric's value out of a snapshot.
    pub fn value_of(&self, status: &ClusterStatus) -> f64 {
        (self.value)(status)
    }

    /// Build a single-sample gauge family for this identity.
    pub fn gauge_family(&self, status: &ClusterStatus) -> MetricFamily {
        let mut gauge = Gauge::default();
        gauge.set_value(self.value_of(status));

        let mut metric = Metric::default();
        metric.set_gauge(gauge);

        let mut family = MetricFamily::default();
        family.set_name(self.desc.fq_name.clone());
        family.set_help(self.desc.help.clone());
        family.set_field_type(MetricType::GAUGE);
        family.mut_metric().push(metric);
        family
    }
}

/// Fixed, ordered set of metric identities.
#[derive(Debug, Clone)]
pub struct MetricCatalog {
    identities: Vec<MetricIdentity>,
}

impl MetricCatalog {
    /// Create a catalog from an explicit list of identities.
    pub fn new(identities: Vec<MetricIdentity>) -> Self {
        Self { identities }
    }

    /// The nine `presto_cluster_*` gauges.
    ///
    /// # Errors
    /// Only fails if the built-in table holds an invalid name.
    pub fn presto_cluster() -> Result<Self, CollectorError> {
        let identities = PRESTO_CLUSTER_METRICS
            .iter()
            .map(|(suffix, help, value)| {
                MetricIdentity::new(format!("{NAMESPACE}_{suffix}"), *help, *value)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(identities))
    }

    /// Descriptors for every identity, in catalog order. Performs no I/O.
    pub fn describe(&self) -> Vec<&Desc> {
        self.identities.iter().map(MetricIdentity::desc).collect()
    }

    /// One gauge family per identity, in catalog order.
    pub fn emit(&self, status: &ClusterStatus) -> Vec<MetricFamily> {
        self.identities
            .iter()
            .map(|identity| identity.gauge_family(status))
            .collect()
    }

    pub fn identities(&self) -> &[MetricIdentity] {
        &self.identities
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED_NAMES: [&str; 9] = [
        "presto_cluster_running_queries",
        "presto_cluster_blocked_queries",
        "presto_cluster_queued_queries",
        "presto_cluster_active_workers",
        "presto_cluster_running_drivers",
        "presto_cluster_reserved_memory",
        "presto_cluster_total_input_rows",
        "presto_cluster_total_input_bytes",
        "presto_cluster_total_cpu_time_secs",
    ];

    #[test]
    fn test_presto_catalog_order() {
        let catalog = MetricCatalog::presto_cluster().unwrap();
        assert_eq!(catalog.len(), 9);

        let names: Vec<&str> = catalog.identities().iter().map(|i| i.name()).collect();
        assert_eq!(names, EXPECTED_NAMES);
    }

    #[test]
    fn test_describe_has_no_labels() {
        let catalog = MetricCatalog::presto_cluster().unwrap();
        let descs = catalog.describe();

        assert_eq!(descs.len(), 9);
        for (desc, name) in descs.iter().zip(EXPECTED_NAMES) {
            assert_eq!(desc.fq_name, name);
            assert!(desc.variable_labels.is_empty());
            assert!(desc.const_label_pairs.is_empty());
            assert!(desc.help.ends_with("of the presto cluster."));
        }
    }

    #[test]
    fn test_accessors_match_fields() {
        let catalog = MetricCatalog::presto_cluster().unwrap();
        let status = ClusterStatus {
            running_queries: 1.0,
            blocked_queries: 2.0,
            queued_queries: 3.0,
            active_workers: 4.0,
            running_drivers: 5.0,
            reserved_memory: 6.0,
            total_input_rows: 7.0,
            total_input_bytes: 8.0,
            total_cpu_time_secs: 9.0,
        };

        let values: Vec<f64> = catalog
            .identities()
            .iter()
            .map(|i| i.value_of(&status))
            .collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_gauge_family_shape() {
        let identity = MetricIdentity::new(
            "presto_cluster_running_queries",
            "Running requests of the presto cluster.",
            |s| s.running_queries,
        )
        .unwrap();
        let status = ClusterStatus {
            running_queries: 42.0,
            ..Default::default()
        };

        let family = identity.gauge_family(&status);
        assert_eq!(family.get_name(), "presto_cluster_running_queries");
        assert_eq!(family.get_field_type(), MetricType::GAUGE);
        assert_eq!(family.get_metric().len(), 1);
        assert!(family.get_metric()[0].get_label().is_empty());
        assert_eq!(family.get_metric()[0].get_gauge().get_value(), 42.0);
    }

    #[test]
    fn test_invalid_name_rejected() {
        let result = MetricIdentity::new("presto cluster", "help", |s| s.running_queries);
        assert!(matches!(result, Err(CollectorError::Config(_))));
    }

    #[test]
    fn test_substitute_catalog() {
        let catalog = MetricCatalog::new(vec![
            MetricIdentity::new("test_workers", "Workers.", |s| s.active_workers).unwrap(),
        ]);
        let status = ClusterStatus {
            active_workers: 3.0,
            ..Default::default()
        };

        let families = catalog.emit(&status);
        assert_eq!(families.len(), 1);
        assert_eq!(families[0].get_name(), "test_workers");
        assert_eq!(families[0].get_metric()[0].get_gauge().get_value(), 3.0);
    }
}
