// Private module declaration
mod server;

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

use crate::domain::customer::CustomerError;

// Re-export for public API
pub use server::{health_handler, metrics_handler};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Per service operation (create_customer, get_customer, ...):
// - calls handled
// - failures, labelled with the error kind
// - latency
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub operations_total: IntCounterVec,
    pub operation_failures: IntCounterVec,
    pub operation_duration: HistogramVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let operations_total = IntCounterVec::new(
            Opts::new("customer_operations_total", "Total customer operations handled"),
            &["operation"],
        )?;
        registry.register(Box::new(operations_total.clone()))?;

        let operation_failures = IntCounterVec::new(
            Opts::new("customer_operation_failures_total", "Customer operations that failed"),
            &["operation", "kind"],
        )?;
        registry.register(Box::new(operation_failures.clone()))?;

        let operation_duration = HistogramVec::new(
            HistogramOpts::new("customer_operation_duration_seconds", "Customer operation duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["operation"],
        )?;
        registry.register(Box::new(operation_duration.clone()))?;

        Ok(Self {
            registry,
            operations_total,
            operation_failures,
            operation_duration,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record one finished operation
    pub fn record_operation(
        &self,
        operation: &str,
        duration_secs: f64,
        error: Option<&CustomerError>,
    ) {
        self.operations_total.with_label_values(&[operation]).inc();
        if let Some(e) = error {
            self.operation_failures
                .with_label_values(&[operation, e.kind().as_str()])
                .inc();
        }
        self.operation_duration
            .with_label_values(&[operation])
            .observe(duration_secs);
    }
}
