//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::handlers::docs;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// Docs pages are mounted under the configured base URL with the landing
/// page at `/`. A base URL of `/` mounts the docs at the root instead and
/// the landing page is not served.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/navigation", get(handlers::navigation::get_navigation))
        .route("/api/pages/", get(handlers::pages::get_root_page))
        .route("/api/pages/{*path}", get(handlers::pages::get_page));

    let base = state.base_url.trim_end_matches('/').to_owned();
    let docs_routes = if base.is_empty() {
        Router::new()
            .route("/", get(docs::get_docs_root))
            .route("/{*path}", get(docs::get_docs_page))
    } else {
        Router::new()
            .route("/", get(docs::get_home))
            .route(&base, get(docs::get_docs_root))
            .route(&format!("{base}/"), get(docs::get_docs_root))
            .route(&format!("{base}/{{*path}}"), get(docs::get_docs_page))
    };

    Router::new()
        .merge(api_routes)
        .merge(docs_routes)
        .fallback(docs::fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
