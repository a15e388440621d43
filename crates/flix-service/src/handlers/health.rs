//! Operational endpoints: greeting and liveness probe.

/// Greeting handler for GET /.
pub async fn greeting() -> &'static str {
    "Welcome to myFlix!"
}

/// Liveness probe handler.
///
/// Returns a simple "OK" response to indicate the process is running.
/// Does NOT check any dependencies - failure means the process is hung/deadlocked.
pub async fn health_check() -> &'static str {
    "OK"
}
