//! Collector error types.

use thiserror::Error;

/// Errors that can occur while building a collector or scraping the cluster.
///
/// Every scrape-time variant aborts the current scrape only. The collector
/// logs it and emits no samples; nothing is propagated to the scrape trigger.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// The request could not be sent (connection refused, DNS, reset...).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with something other than `200 OK`.
    #[error("unexpected status code {status} from {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body could not be read.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body is not a valid cluster status document.
    #[error("failed to decode cluster status: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

impl From<prometheus::Error> for CollectorError {
    fn from(err: prometheus::Error) -> Self {
        Self::Config(format!("invalid metric descriptor: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_reports_code() {
        let err = CollectorError::UnexpectedStatus {
            url: "http://presto:8080/v1/cluster".to_string(),
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("http://presto:8080/v1/cluster"));
    }

    #[test]
    fn test_decode_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = CollectorError::from(serde_err);
        assert!(err.to_string().starts_with("failed to decode cluster status"));
    }
}
