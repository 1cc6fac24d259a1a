//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use s2s_core::config::app::ServerConfig;
use s2s_core::error::AppError;
use s2s_service::{S2sServices, SormasToSormasEntityInterface};

/// Application state passed to every handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Protocol engines of every entity kind.
    pub services: S2sServices,
    /// HTTP server settings.
    pub server: Arc<ServerConfig>,
    /// Process start, for the health endpoint.
    pub started_at: Instant,
}

impl AppState {
    /// Creates the state.
    pub fn new(services: S2sServices, server: ServerConfig) -> Self {
        Self {
            services,
            server: Arc::new(server),
            started_at: Instant::now(),
        }
    }

    /// Engine of the entity kind named by a path segment.
    pub fn engine(&self, kind: &str) -> Result<&Arc<dyn SormasToSormasEntityInterface>, AppError> {
        self.services
            .for_resource(kind)
            .ok_or_else(|| AppError::not_found(format!("Unknown entity kind: {kind}")))
    }
}
