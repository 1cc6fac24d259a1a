//! Route definitions.
//!
//! Peer-facing routes are mounted below the configured S2S resource path,
//! internal routes below `/api`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let resource_path = state.services.registry().resource_path().to_string();
    let max_body = state.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(share_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(exchange_routes(&resource_path))
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Endpoints peers deliver encrypted batches to.
fn exchange_routes(resource_path: &str) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{resource_path}/{{kind}}"),
            post(handlers::exchange::save_shared).put(handlers::exchange::save_returned),
        )
        .route(
            &format!("{resource_path}/{{kind}}/sync"),
            post(handlers::exchange::save_synced),
        )
}

/// Share, return, sync, and ledger view for local users.
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/s2s/organizations", get(handlers::share::organizations))
        .route("/s2s/{kind}/share", post(handlers::share::share_entities))
        .route("/s2s/{kind}/{uuid}/return", post(handlers::share::return_entity))
        .route("/s2s/{kind}/{uuid}/sync", post(handlers::share::sync_entity))
        .route("/s2s/{kind}/{uuid}/shares", get(handlers::share::share_infos))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
