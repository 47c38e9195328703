//! Presto cluster status collector.
//!
//! Fetches `/v1/cluster` on every scrape and translates the response into
//! one gauge per catalog entry.

use std::time::{Duration, Instant};

use prometheus::core::{Collector as PrometheusCollector, Desc};
use prometheus::proto::MetricFamily;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::collector::{ClusterStatus, CollectorError, MetricCatalog};

/// Default upstream status endpoint.
pub const DEFAULT_URL: &str = "http://localhost:8080/v1/cluster";

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

/// Configuration for the cluster status collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Cluster status URL.
    #[serde(default = "default_url")]
    pub url: String,
    /// Request timeout. Unset means the HTTP client's default.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

impl ClusterConfig {
    /// Create a configuration for the given status URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Collector translating Presto cluster status into Prometheus gauges.
///
/// Holds only immutable configuration. Every `collect()` call performs its
/// own fetch and decode, so concurrent scrapes never share values.
pub struct ClusterCollector {
    config: ClusterConfig,
    catalog: MetricCatalog,
    client: Client,
}

impl ClusterCollector {
    /// Create a new collector with the given configuration and catalog.
    ///
    /// # Errors
    /// Returns `CollectorError::Config` if the HTTP client cannot be built.
    pub fn new(config: ClusterConfig, catalog: MetricCatalog) -> Result<Self, CollectorError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| CollectorError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            catalog,
            client,
        })
    }

    /// Get the collector's configuration.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Get the metric catalog.
    pub fn catalog(&self) -> &MetricCatalog {
        &self.catalog
    }

    /// Fetch and decode one status document.
    ///
    /// The response is owned by this call and released on every return path.
    ///
    /// # Errors
    /// - `Transport`: the request could not be sent
    /// - `UnexpectedStatus`: the upstream did not answer `200 OK`
    /// - `Body`: the body could not be read
    /// - `Decode`: the body is not a valid status document
    pub fn scrape(&self) -> Result<ClusterStatus, CollectorError> {
        let url = &self.config.url;

        let response =
            self.client
                .get(url)
                .send()
                .map_err(|source| CollectorError::Transport {
                    url: url.clone(),
                    source,
                })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CollectorError::UnexpectedStatus {
                url: url.clone(),
                status,
            });
        }

        let body = response.bytes().map_err(|source| CollectorError::Body {
            url: url.clone(),
            source,
        })?;

        Ok(ClusterStatus::from_slice(&body)?)
    }
}

impl std::fmt::Debug for ClusterCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterCollector")
            .field("config", &self.config)
            .field("metrics", &self.catalog.len())
            .finish_non_exhaustive()
    }
}

impl PrometheusCollector for ClusterCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.catalog.describe()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let start = Instant::now();

        match self.scrape() {
            Ok(status) => {
                tracing::debug!(
                    url = %self.config.url,
                    elapsed = ?start.elapsed(),
                    running_queries = status.running_queries,
                    active_workers = status.active_workers,
                    "Cluster status scrape successful"
                );
                self.catalog.emit(&status)
            }
            Err(CollectorError::UnexpectedStatus { url, status }) => {
                tracing::error!(
                    url = %url,
                    status = status.as_u16(),
                    "Cluster status request returned unexpected status code"
                );
                Vec::new()
            }
            Err(e) => {
                tracing::error!(
                    url = %self.config.url,
                    error = %e,
                    "Cluster status scrape failed"
                );
                Vec::new()
            }
        }
    }
}
