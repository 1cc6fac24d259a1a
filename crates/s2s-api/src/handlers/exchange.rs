//! Peer-facing handlers: other instances deliver encrypted batches here.

use axum::extract::{Path, State};
use axum::http::StatusCode;

use s2s_core::types::EncryptedData;

use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// POST {resource_path}/{kind}
pub async fn save_shared(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    JsonBody(payload): JsonBody<EncryptedData>,
) -> Result<StatusCode, ApiError> {
    state.engine(&kind)?.save_shared_entities(&payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT {resource_path}/{kind}
pub async fn save_returned(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    JsonBody(payload): JsonBody<EncryptedData>,
) -> Result<StatusCode, ApiError> {
    state.engine(&kind)?.save_returned_entity(&payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST {resource_path}/{kind}/sync
pub async fn save_synced(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    JsonBody(payload): JsonBody<EncryptedData>,
) -> Result<StatusCode, ApiError> {
    state.engine(&kind)?.save_synced_entity(&payload).await?;
    Ok(StatusCode::NO_CONTENT)
}
