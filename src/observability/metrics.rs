//! # Metrics
//!
//! Prometheus metrics for monitoring client behavior.
//!
//! ## Metrics Exposed
//!
//! - `secrets_manager_operations_total` - Total store operations, by operation
//! - `secrets_manager_operation_duration_seconds` - Duration of store operations, by operation
//! - `secrets_manager_operation_errors_total` - Total failed store operations, by operation
//! - `secrets_manager_waiter_polls_total` - Total lifecycle-state polls
//! - `secrets_manager_waiter_failures_total` - Failed waits, by cause
//!
//! The statics work without registration; embedders that expose metrics call
//! [`register_metrics`] once and scrape [`registry`].

use anyhow::Result;
use prometheus::{HistogramVec, IntCounter, IntCounterVec, Registry};
use std::sync::LazyLock;

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static OPERATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "secrets_manager_operations_total",
            "Total number of Secrets Manager store operations",
        ),
        &["operation"],
    )
    .expect("Failed to create OPERATIONS_TOTAL metric - this should never happen")
});

static OPERATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "secrets_manager_operation_duration_seconds",
            "Duration of Secrets Manager store operations in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["operation"],
    )
    .expect("Failed to create OPERATION_DURATION metric - this should never happen")
});

static OPERATION_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "secrets_manager_operation_errors_total",
            "Total number of failed Secrets Manager store operations",
        ),
        &["operation"],
    )
    .expect("Failed to create OPERATION_ERRORS_TOTAL metric - this should never happen")
});

static WAITER_POLLS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "secrets_manager_waiter_polls_total",
        "Total number of lifecycle-state polls issued by waiters",
    )
    .expect("Failed to create WAITER_POLLS_TOTAL metric - this should never happen")
});

static WAITER_FAILURES_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "secrets_manager_waiter_failures_total",
            "Total number of lifecycle waits that ended in failure",
        ),
        &["cause"],
    )
    .expect("Failed to create WAITER_FAILURES_TOTAL metric - this should never happen")
});

/// Register all metrics with the crate registry
///
/// # Errors
/// Returns an error if a metric is registered twice.
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(OPERATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(OPERATION_DURATION.clone()))?;
    REGISTRY.register(Box::new(OPERATION_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(WAITER_POLLS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(WAITER_FAILURES_TOTAL.clone()))?;
    Ok(())
}

/// Registry holding the crate's metrics, for embedders that expose them
#[must_use]
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Record a completed store operation
pub fn record_store_operation(operation: &str, duration_secs: f64) {
    OPERATIONS_TOTAL.with_label_values(&[operation]).inc();
    OPERATION_DURATION
        .with_label_values(&[operation])
        .observe(duration_secs);
}

/// Record a failed store operation
pub fn increment_store_errors(operation: &str) {
    OPERATION_ERRORS_TOTAL.with_label_values(&[operation]).inc();
}

/// Record one lifecycle-state poll
pub fn increment_waiter_polls() {
    WAITER_POLLS_TOTAL.inc();
}

/// Record a wait that ended in failure
pub fn increment_waiter_failures(cause: &str) {
    WAITER_FAILURES_TOTAL.with_label_values(&[cause]).inc();
}
