//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, orders, paintings};
use crate::state::AppState;

/// Maximum concurrent requests across all API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `GET /api` - Liveness message
///
/// ## Catalog
/// - `GET /api/paintings` - List paintings
/// - `POST /api/paintings` - Create painting
/// - `GET /api/paintings/:id` - Get painting
/// - `PUT /api/paintings/:id` - Update painting
/// - `DELETE /api/paintings/:id` - Delete painting
///
/// ## Orders
/// - `GET /api/orders` - All orders with customers
/// - `POST /api/orders` - Check out paintings
/// - `GET /api/orders/:user_id` - A user's orders
///
/// ## Admin
/// - `GET /api/admin/orders` - Orders with nested paintings
/// - `POST /api/admin/orders` - Single-line order
/// - `GET /api/admin/order-form` - Order form dropdowns
///
/// Every other path is served from the static directory, falling back to
/// its `index.html`.
pub fn create_router(state: AppState) -> Router {
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;
    let static_dir = state.config.static_dir.clone();
    let index_file = state.config.index_file();

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let admin_routes = Router::new()
        .route(
            "/orders",
            get(orders::list_orders_with_items).post(orders::create_order),
        )
        .route("/order-form", get(orders::order_form_options));

    let api_routes = Router::new()
        .route("/", get(health::api_root))
        // Catalog
        .route(
            "/paintings",
            get(paintings::list_paintings).post(paintings::create_painting),
        )
        .route(
            "/paintings/:id",
            get(paintings::get_painting)
                .put(paintings::update_painting)
                .delete(paintings::delete_painting),
        )
        // Orders
        .route(
            "/orders",
            get(orders::list_all_orders).post(orders::place_order),
        )
        .route("/orders/:user_id", get(orders::list_user_orders))
        .nest("/admin", admin_routes);
    let api_routes = limit_concurrency(api_routes, API_MAX_CONCURRENT_REQUESTS);

    let frontend = ServeDir::new(static_dir).fallback(ServeFile::new(index_file));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        .fallback_service(frontend)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Cap in-flight requests over every route of `router` with one shared
/// semaphore. `Router::layer` wraps each route separately, so a plain
/// `ConcurrencyLimitLayer` would give each route its own limit.
fn limit_concurrency<S>(router: Router<S>, max: usize) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(GlobalConcurrencyLimitLayer::new(max))
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
