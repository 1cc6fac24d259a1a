//! Application builder: wires router, middleware, and state into an Axum app.

use axum::Router;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}
