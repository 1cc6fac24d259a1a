//! `JsonBody` extractor: `Json` with rejections in the API error shape.
//!
//! A body that does not deserialize is answered with `{error, message}`
//! like every other failure peers receive.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use s2s_core::error::AppError;

use crate::error::ApiError;

/// A JSON request body.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::validation(format!("Malformed request body: {}", rejection.body_text()))
            })?;
        Ok(Self(value))
    }
}
