//! HTTP routing configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, http::StatusCode, routing::get};
use tower::ServiceBuilder;
use tower_http::{
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, warn};

use crate::app::AppState;
use crate::config::DEFAULT_REQUEST_TIMEOUT;

use super::handlers::{
    create_client_handler, delete_client_handler, get_client_handler, health_check_handler,
    list_clients_handler, liveness_handler, readiness_handler, update_client_handler,
};

/// Router options beyond the API itself
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Requests running longer than this get a 408
    pub request_timeout: Duration,
    /// Directory served for every path the API does not claim
    pub static_dir: Option<PathBuf>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            static_dir: None,
        }
    }
}

/// Create router with the API and health routes only
pub fn create_router(app_state: Arc<AppState>) -> Router {
    create_router_with_config(app_state, RouterConfig::default())
}

/// Create router with timeout and optional static asset fallback
pub fn create_router_with_config(app_state: Arc<AppState>, config: RouterConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ));

    // Client routes
    let client_routes = Router::new()
        .route("/", get(list_clients_handler).post(create_client_handler))
        .route(
            "/{id}",
            get(get_client_handler)
                .put(update_client_handler)
                .delete(delete_client_handler),
        );

    // Health routes
    let health_routes = Router::new()
        .route("/", get(health_check_handler))
        .route("/live", get(liveness_handler))
        .route("/ready", get(readiness_handler));

    let router = Router::new()
        .nest("/api/clientes", client_routes)
        .nest("/health", health_routes);

    let router = match config.static_dir.as_deref() {
        Some(dir) => with_static_assets(router, dir),
        None => router,
    };

    router.layer(middleware).with_state(app_state)
}

fn with_static_assets(router: Router<Arc<AppState>>, dir: &Path) -> Router<Arc<AppState>> {
    if dir.is_dir() {
        info!(dir = %dir.display(), "Serving static assets");
        router.fallback_service(ServeDir::new(dir))
    } else {
        warn!(dir = %dir.display(), "Static asset directory not found, skipping");
        router
    }
}
