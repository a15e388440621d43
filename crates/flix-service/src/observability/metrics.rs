//! Metrics definitions for the myFlix API.
//!
//! All metrics follow Prometheus naming conventions:
//! - `flix_` prefix for this service
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded to prevent cardinality explosion:
//! - `method`: 7 values max (GET, POST, PATCH, DELETE, PUT, HEAD, OPTIONS)
//! - `endpoint`: ~12 values (parameterized paths)
//! - `status`: 3 values (success, error, timeout)
//! - `error_category`: 5 values (see `ErrorCategory`)

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics recorder and return the handle
/// for serving metrics via HTTP.
///
/// Must be called before any metrics are recorded. Histogram buckets
/// for login and registration carry a longer tail because both paths
/// run a bcrypt verification or hash.
///
/// # Errors
///
/// Returns error if Prometheus recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("flix_http_request".to_string()),
            &[
                0.005, 0.010, 0.025, 0.050, 0.100, 0.150, 0.200, 0.300, 0.500, 1.000, 2.000,
            ],
        )
        .map_err(|e| format!("Failed to set HTTP request buckets: {e}"))?
        // bcrypt at the default cost dominates; sub-5ms buckets would be noise
        .set_buckets_for_metric(
            Matcher::Prefix("flix_login".to_string()),
            &[0.050, 0.100, 0.200, 0.350, 0.500, 0.750, 1.000, 2.000],
        )
        .map_err(|e| format!("Failed to set login buckets: {e}"))?
        .set_buckets_for_metric(
            Matcher::Prefix("flix_registration".to_string()),
            &[0.050, 0.100, 0.200, 0.350, 0.500, 0.750, 1.000, 2.000],
        )
        .map_err(|e| format!("Failed to set registration buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

// ============================================================================
// HTTP Request Metrics
// ============================================================================

/// Record HTTP request completion
///
/// Metric: `flix_http_requests_total`, `flix_http_request_duration_seconds`
/// Labels: `method`, `endpoint`, `status` / `status_code`
///
/// This captures ALL HTTP responses including framework-level errors like:
/// - 415 Unsupported Media Type (wrong Content-Type)
/// - 400 Bad Request (JSON parse errors)
/// - 404 Not Found
/// - 405 Method Not Allowed
pub fn record_http_request(method: &str, endpoint: &str, status_code: u16, duration: Duration) {
    // Normalize endpoint to prevent cardinality explosion
    let normalized_endpoint = normalize_endpoint(endpoint);

    // Determine status category for simplified querying
    let status = categorize_status_code(status_code);

    histogram!("flix_http_request_duration_seconds",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint.clone(),
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());

    counter!("flix_http_requests_total",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint,
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

/// Categorize HTTP status code into success/error/timeout
fn categorize_status_code(status_code: u16) -> &'static str {
    match status_code {
        200..=299 => "success",
        408 | 504 => "timeout",
        _ => "error",
    }
}

/// Normalize endpoint path to prevent label cardinality explosion
///
/// Replaces dynamic segments (usernames, titles, movie ids) with placeholders.
fn normalize_endpoint(path: &str) -> String {
    // Known static paths
    match path {
        "/" => "/".to_string(),
        "/health" => "/health".to_string(),
        "/metrics" => "/metrics".to_string(),
        "/login" => "/login".to_string(),
        "/users" => "/users".to_string(),
        "/movies" => "/movies".to_string(),
        _ => normalize_dynamic_endpoint(path),
    }
}

/// Normalize paths with dynamic segments
fn normalize_dynamic_endpoint(path: &str) -> String {
    if path.starts_with("/users/") {
        let parts: Vec<&str> = path.split('/').collect();

        // /users/{username} → parts.len() == 3
        if parts.len() == 3 {
            return "/users/{username}".to_string();
        }

        // /users/{username}/favorites/{movie_id} → parts.len() == 5
        if parts.len() == 5 {
            if let Some(section) = parts.get(3) {
                if *section == "favorites" {
                    return "/users/{username}/favorites/{movie_id}".to_string();
                }
            }
        }
    }

    if path.starts_with("/movies/") {
        let parts: Vec<&str> = path.split('/').collect();

        // /movies/genres/{name} and /movies/directors/{name} → parts.len() == 4
        if parts.len() == 4 {
            if let Some(section) = parts.get(2) {
                if *section == "genres" {
                    return "/movies/genres/{name}".to_string();
                }
                if *section == "directors" {
                    return "/movies/directors/{name}".to_string();
                }
            }
        }

        // /movies/{title} → parts.len() == 3
        if parts.len() == 3 {
            return "/movies/{title}".to_string();
        }
    }

    // Unknown paths normalized to "/other" to bound cardinality
    "/other".to_string()
}

// ============================================================================
// Login Metrics
// ============================================================================

/// Record a login attempt and its duration
///
/// Metric: `flix_login_attempts_total`, `flix_login_duration_seconds`
/// Labels: `status`
///
/// Status values: "success", "error"
pub fn record_login_attempt(status: &str, duration: Duration) {
    histogram!("flix_login_duration_seconds",
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());

    counter!("flix_login_attempts_total",
        "status" => status.to_string()
    )
    .increment(1);
}

// ============================================================================
// Token Metrics
// ============================================================================

/// Record session token issuance
///
/// Metric: `flix_tokens_issued_total`
/// Labels: `status`
pub fn record_token_issuance(status: &str) {
    counter!("flix_tokens_issued_total",
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record session token validation outcome.
///
/// Emits two metrics:
/// - `flix_token_validations_total` counter (labels: `status`)
/// - `flix_token_validation_failures_total` counter (labels: `error_category`, on failure only)
///
/// # Arguments
///
/// * `status` - "success" or "error"
/// * `error_category` - Bounded failure category (e.g., "cryptographic", "clock_skew")
pub fn record_token_validation(status: &str, error_category: Option<&str>) {
    counter!("flix_token_validations_total",
        "status" => status.to_string()
    )
    .increment(1);

    if let Some(category) = error_category {
        counter!("flix_token_validation_failures_total",
            "error_category" => category.to_string()
        )
        .increment(1);
    }
}

// ============================================================================
// Registration Metrics
// ============================================================================

/// Record an account registration attempt and its duration
///
/// Metric: `flix_registrations_total`, `flix_registration_duration_seconds`
/// Labels: `status`
///
/// Status values: "success", "error"
pub fn record_registration(status: &str, duration: Duration) {
    histogram!("flix_registration_duration_seconds",
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());

    counter!("flix_registrations_total",
        "status" => status.to_string()
    )
    .increment(1);
}

// ============================================================================
// Error Metrics
// ============================================================================

/// Record error by category.
///
/// Metric: `flix_errors_total`
/// Labels: `operation`, `error_category`, `status_code`
///
/// Operations: "login", "register", "token_validation", "update_account",
/// "delete_account", "add_favorite", "remove_favorite", catalog reads.
pub fn record_error(operation: &str, error_category: &str, status_code: u16) {
    counter!("flix_errors_total",
        "operation" => operation.to_string(),
        "error_category" => error_category.to_string(),
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

// ============================================================================
// Tests
// ============================================================================
