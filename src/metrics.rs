//! Prometheus metrics for the OIDC provider.

use once_cell::sync::Lazy;
use prometheus::{register_counter_vec, CounterVec, Encoder, TextEncoder};

/// Tokens issued counter.
pub static TOKENS_ISSUED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "oidc_tokens_issued_total",
        "Total number of tokens issued",
        &["token_type"]
    )
    .expect("Failed to register tokens_issued metric")
});

/// Token validation outcomes counter.
pub static TOKEN_VALIDATIONS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "oidc_token_validations_total",
        "Total number of token validations",
        &["status", "reason"]
    )
    .expect("Failed to register token_validations metric")
});

/// Record a token issuance. `token_type` is `code`, `access_token` or `id_token`.
pub fn record_token_issued(token_type: &str) {
    TOKENS_ISSUED.with_label_values(&[token_type]).inc();
}

pub fn record_validation_success() {
    TOKEN_VALIDATIONS.with_label_values(&["success", "none"]).inc();
}

pub fn record_validation_failure(reason: &str) {
    TOKEN_VALIDATIONS.with_label_values(&["failure", reason]).inc();
}

/// Render the default registry in the text exposition format.
pub fn gather() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if encoder.encode(&prometheus::gather(), &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
