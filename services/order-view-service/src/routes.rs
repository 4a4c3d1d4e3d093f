use axum::{middleware::from_fn, routing::get, Router};
use common::metrics;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::handlers;
use crate::middleware::cors;
use crate::state::AppState;

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> Result<String, ApiError> {
    metrics::gather_metrics().map_err(|e| ApiError::Internal(e.into()))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(metrics_handler))

        // Order view: identifier in the path, or via ?id= when the path
        // carries no tail beyond the route name
        .route(
            "/order-view",
            get(handlers::order_view::order_view_by_query)
                .options(handlers::order_view::preflight),
        )
        .route(
            "/order-view/",
            get(handlers::order_view::order_view_by_query)
                .options(handlers::order_view::preflight),
        )
        .route(
            "/order-view/:id",
            get(handlers::order_view::order_view_by_path)
                .options(handlers::order_view::preflight),
        )

        // Middleware
        .layer(from_fn(cors::apply_cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
