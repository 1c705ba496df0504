use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::application::handlers::{admin_handler, dashboard_handler, ingestion_handler};
use crate::application::services::bridge_service::BridgeService;
use crate::rate_limit::{create_rate_limiter, rate_limit_middleware, RateLimiterConfig};

/// Path the terminal polls.
pub const INGEST_PATH: &str = "/web/api/echo";

/// Full route table. The ingestion route is never rate limited.
pub fn build_router(service: Arc<BridgeService>) -> Router {
    let limiter = create_rate_limiter(RateLimiterConfig {
        requests_per_minute: service.config.admin_requests_per_minute,
    });

    let admin = Router::new()
        .route("/send_command", post(admin_handler::enqueue_command))
        .route("/delete_command/:index", post(admin_handler::delete_command))
        .route("/clear_commands", post(admin_handler::clear_commands))
        .route_layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));

    Router::new()
        .route("/", get(dashboard_handler::index))
        .route("/health", get(dashboard_handler::health_check))
        .route(INGEST_PATH, post(ingestion_handler::ingest_status_report))
        .route("/api/history", get(dashboard_handler::get_history))
        .route("/api/latest", get(dashboard_handler::get_latest))
        .route("/api/commands", get(dashboard_handler::get_commands))
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
