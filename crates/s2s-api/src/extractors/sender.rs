//! `Sender` extractor: the acting user of an internal request.
//!
//! Authentication happens at the gateway, which forwards the user in the
//! `x-user-id` and `x-user-name` headers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use s2s_core::error::AppError;
use s2s_core::types::UserId;
use s2s_service::RequestContext;

use crate::error::ApiError;

/// Header carrying the user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the user's display name.
pub const USER_NAME_HEADER: &str = "x-user-name";

/// The user on whose behalf a share, return, or sync is performed.
#[derive(Debug, Clone)]
pub struct Sender(pub RequestContext);

impl std::ops::Deref for Sender {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Sender {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id: UserId = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::validation(format!("Missing {USER_ID_HEADER} header")))?
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid {USER_ID_HEADER} header")))?;

        let user_name = parts
            .headers
            .get(USER_NAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or("unknown");

        Ok(Sender(RequestContext::new(user_id, user_name)))
    }
}
