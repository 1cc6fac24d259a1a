//! # s2s-api
//!
//! HTTP API layer built on Axum.
//!
//! Serves the peer-facing endpoints other instances deliver encrypted
//! payloads to, and the internal endpoints local users trigger shares,
//! returns, and syncs through. Provides the sender extractor, DTOs,
//! request logging, and the mapping of protocol errors to JSON bodies.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
