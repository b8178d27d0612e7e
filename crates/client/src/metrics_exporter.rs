//! Prometheus exposition of wallet call metrics.
//!
//! Installs a global `metrics` recorder backed by
//! `metrics-exporter-prometheus` and serves the text format at
//! `http://<bind>/metrics`.
//!
//! ```rust,ignore
//! use mintwizard_client::metrics_exporter::MetricsExporter;
//!
//! let exporter = MetricsExporter::install("127.0.0.1:9090")?;
//! ```

use std::net::SocketAddr;

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use tracing::info;

use crate::metrics::METRIC_CALL_DURATION;

/// Histogram buckets for wallet calls, in seconds. Confirmation waits can
/// take minutes, so the upper buckets are wide.
const CALL_DURATION_BUCKETS: &[f64] = &[
    0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 300.0, 600.0,
];

/// Handle to the installed Prometheus recorder.
pub struct MetricsExporter {
    bind_addr: SocketAddr,
}

impl MetricsExporter {
    /// Install the exporter as the process-wide metrics recorder.
    ///
    /// # Errors
    /// Fails when `bind_addr` is not a socket address, when another recorder
    /// is already installed, or when the listener cannot be built.
    pub fn install(bind_addr: &str) -> Result<Self, MetricsExporterError> {
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| MetricsExporterError::InvalidBindAddress(bind_addr.to_string(), e))?;

        PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(METRIC_CALL_DURATION.to_string()),
                CALL_DURATION_BUCKETS,
            )?
            .with_http_listener(addr)
            .install_recorder()
            .map_err(|_| MetricsExporterError::RecorderAlreadyInstalled)?;

        info!(%addr, "Prometheus metrics exporter listening on /metrics");

        Ok(Self { bind_addr: addr })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Errors that can occur when installing the metrics exporter.
#[derive(Debug, thiserror::Error)]
pub enum MetricsExporterError {
    #[error("Invalid metrics bind address '{0}': {1}")]
    InvalidBindAddress(String, std::net::AddrParseError),

    #[error("A metrics recorder is already installed")]
    RecorderAlreadyInstalled,

    #[error("Failed to build Prometheus recorder: {0}")]
    BuildError(String),
}

impl From<metrics_exporter_prometheus::BuildError> for MetricsExporterError {
    fn from(err: metrics_exporter_prometheus::BuildError) -> Self {
        MetricsExporterError::BuildError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_hostname_bind_address() {
        let result = MetricsExporter::install("metrics.local:9090");
        assert!(matches!(
            result,
            Err(MetricsExporterError::InvalidBindAddress(_, _))
        ));
    }

    #[test]
    fn test_buckets_are_sorted() {
        assert!(CALL_DURATION_BUCKETS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_error_display_names_address() {
        let parse_error = "bogus".parse::<SocketAddr>().unwrap_err();
        let error = MetricsExporterError::InvalidBindAddress("bogus".to_string(), parse_error);
        assert!(error.to_string().contains("'bogus'"));
    }
}
