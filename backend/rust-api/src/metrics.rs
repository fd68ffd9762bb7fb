use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

use crate::errors::ErrorSet;

lazy_static! {
    // Question form metrics
    pub static ref QUESTION_SUBMISSIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "question_submissions_total",
        "Total number of question form submissions",
        &["outcome"]
    )
    .unwrap();

    pub static ref QUESTION_VALIDATION_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "question_validation_errors_total",
        "Total number of validation errors reported for question forms",
        &["kind"]
    )
    .unwrap();

    // Store metrics
    pub static ref STORE_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "store_operations_total",
        "Total number of question store operations",
        &["operation", "status"]
    )
    .unwrap();

    pub static ref STORE_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "store_operation_duration_seconds",
        "Question store operation duration in seconds",
        &["operation"],
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25]
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

/// Helper: track store operation with metrics
pub async fn track_store_operation<F, T, E>(operation: &str, future: F) -> Result<T, E>
where
    F: std::future::Future<Output = Result<T, E>>,
{
    let start = std::time::Instant::now();
    let result = future.await;
    let duration = start.elapsed().as_secs_f64();

    let status = if result.is_ok() { "success" } else { "error" };

    STORE_OPERATIONS_TOTAL
        .with_label_values(&[operation, status])
        .inc();

    STORE_OPERATION_DURATION_SECONDS
        .with_label_values(&[operation])
        .observe(duration);

    result
}

/// Record an accepted submission
pub fn record_submission_accepted() {
    QUESTION_SUBMISSIONS_TOTAL
        .with_label_values(&["accepted"])
        .inc();
}

/// Record a rejected submission and each of its errors
pub fn record_submission_rejected(errors: &ErrorSet) {
    QUESTION_SUBMISSIONS_TOTAL
        .with_label_values(&["rejected"])
        .inc();
    for (_, error) in errors.iter() {
        QUESTION_VALIDATION_ERRORS_TOTAL
            .with_label_values(&[error.kind()])
            .inc();
    }
}
