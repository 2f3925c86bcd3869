use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, TextEncoder, register_counter, register_counter_vec};
use thiserror::Error;

lazy_static! {
    pub static ref SUBMISSIONS_TOTAL: Counter =
        register_counter!("contact_gate_submissions_total", "Total submission attempts").unwrap();
    pub static ref SUBMISSIONS_ALLOWED: Counter =
        register_counter!("contact_gate_submissions_allowed_total", "Submissions let through").unwrap();
    pub static ref SUBMISSIONS_REJECTED: CounterVec = register_counter_vec!(
        "contact_gate_submissions_rejected_total",
        "Submissions rejected, by reason",
        &["reason"]
    )
    .unwrap();
    pub static ref HANDOFF_FAILURES: Counter =
        register_counter!("contact_gate_handoff_failures_total", "Failed hand-offs to the host").unwrap();
}

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("failed to encode metrics: {0}")]
    Encode(#[from] prometheus::Error),
    #[error("metrics output is not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// Text exposition of everything registered in the default registry
pub fn render() -> Result<String, MetricsError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
