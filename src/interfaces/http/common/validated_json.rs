//! JSON body extractor that also runs `validator` rules.
//!
//! Rejections use the same envelope as every other error: the status
//! axum picked for malformed bodies (400, 415 or 422), and 422 listing
//! each failing field for rule violations.

use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use super::{ApiError, ApiResponse};
use crate::shared::validations::describe_violations;

/// `Json<T>` whose payload passed `T::validate()`
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            debug!(error = %rejection, "Rejected request body");
            (
                rejection.status(),
                Json(ApiResponse::error(rejection.body_text())),
            )
        })?;

        value.validate().map_err(|errors| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::error(describe_violations(&errors))),
            )
        })?;

        Ok(ValidatedJson(value))
    }
}
