//! HTTP routes for the myFlix API.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::handlers;
use crate::middleware::{http_metrics_middleware, require_auth};
use crate::store::{MovieCatalog, UserStore};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// User account storage.
    pub users: Arc<dyn UserStore>,

    /// Movie catalog storage.
    pub movies: Arc<dyn MovieCatalog>,

    /// Service configuration.
    pub config: Config,
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/` - Greeting - public
/// - `/health` - Liveness probe (simple "OK") - public
/// - `/metrics` - Prometheus metrics endpoint - public
/// - `POST /login` - Credential verification and token issuance - public
/// - `POST /users` - Account registration - public
/// - `/users/{username}` and favorites - owner-gated account management
/// - `/movies` and catalog lookups - authenticated reads
/// - TraceLayer for request logging
/// - 30 second request timeout
/// - Permissive CORS (browser clients on arbitrary origins)
/// - HTTP metrics middleware as the outermost layer
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/", get(handlers::greeting))
        .route("/health", get(handlers::health_check))
        .route("/login", post(handlers::login))
        .route("/users", post(handlers::register))
        .with_state(state.clone());

    // Metrics route with its own state
    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // Protected routes (authentication required, 401 before any handler runs)
    let protected_routes = Router::new()
        .route(
            "/users/:username",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route(
            "/users/:username/favorites/:movie_id",
            post(handlers::add_favorite).delete(handlers::remove_favorite),
        )
        .route("/movies", get(handlers::list_movies))
        .route("/movies/:title", get(handlers::get_movie))
        .route("/movies/genres/:name", get(handlers::get_genre))
        .route("/movies/directors/:name", get(handlers::get_director))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    // Merge routes and apply global middleware layers. The metrics layer is
    // added last so it wraps everything, capturing framework-level errors
    // (404, 405, 415) alongside handler responses.
    public_routes
        .merge(metrics_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(http_metrics_middleware))
}
