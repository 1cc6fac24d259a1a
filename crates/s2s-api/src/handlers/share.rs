//! Internal handlers: local users share, return, and sync entities.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use s2s_core::error::AppError;
use s2s_entity::share::ShareInfo;

use crate::dto::request::{EntityOptionsRequest, ShareRequest};
use crate::dto::response::{ApiResponse, OrganizationsResponse};
use crate::error::ApiError;
use crate::extractors::{JsonBody, Sender};
use crate::state::AppState;

/// POST /api/s2s/{kind}/share
pub async fn share_entities(
    State(state): State<AppState>,
    sender: Sender,
    Path(kind): Path<String>,
    JsonBody(req): JsonBody<ShareRequest>,
) -> Result<StatusCode, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .engine(&kind)?
        .share_entities(&sender, &req.entity_uuids, req.options.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/s2s/{kind}/{uuid}/return
pub async fn return_entity(
    State(state): State<AppState>,
    sender: Sender,
    Path((kind, uuid)): Path<(String, Uuid)>,
    JsonBody(req): JsonBody<EntityOptionsRequest>,
) -> Result<StatusCode, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .engine(&kind)?
        .return_entity(&sender, uuid, req.options.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/s2s/{kind}/{uuid}/sync
pub async fn sync_entity(
    State(state): State<AppState>,
    sender: Sender,
    Path((kind, uuid)): Path<(String, Uuid)>,
    JsonBody(req): JsonBody<EntityOptionsRequest>,
) -> Result<StatusCode, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .engine(&kind)?
        .sync_entity(&sender, uuid, req.options.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/s2s/{kind}/{uuid}/shares
pub async fn share_infos(
    State(state): State<AppState>,
    Path((kind, uuid)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<Vec<ShareInfo>>>, ApiError> {
    let infos = state.engine(&kind)?.share_infos(uuid).await?;
    Ok(Json(ApiResponse::ok(infos)))
}

/// GET /api/s2s/organizations
pub async fn organizations(State(state): State<AppState>) -> Json<ApiResponse<OrganizationsResponse>> {
    let registry = state.services.registry();
    Json(ApiResponse::ok(OrganizationsResponse {
        own: registry.own_organization().clone(),
        peers: registry.organizations(),
    }))
}
