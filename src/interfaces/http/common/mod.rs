//! Shared HTTP building blocks: response envelope, error mapping and the
//! validating JSON extractor

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard API response envelope
///
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "data": null, "error": "message"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Empty payload for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Map a domain error onto a status code and a user-facing message.
///
/// Server-side failures are logged here and reported generically.
pub fn error_response(e: DomainError) -> ApiError {
    let (status, message) = match &e {
        DomainError::Validation { field, reason } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("{}: {}", field, reason),
        ),
        DomainError::NotFound { entity, .. } => {
            (StatusCode::NOT_FOUND, format!("{} not found", entity))
        }
        DomainError::EmptyCart => (StatusCode::CONFLICT, "Your cart is empty".to_string()),
        DomainError::VehicleUnavailable { vehicle_id } => (
            StatusCode::CONFLICT,
            format!("Vehicle {} is no longer available", vehicle_id),
        ),
        DomainError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
        DomainError::CheckoutFailed { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to place order".to_string(),
        ),
        DomainError::Storage(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        ),
    };

    if status.is_server_error() {
        error!(error = %e, "Request failed");
    }

    (status, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CheckoutStage;
    use uuid::Uuid;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (DomainError::validation("name", "too short"), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::not_found("Vehicle", Uuid::nil()), StatusCode::NOT_FOUND),
            (DomainError::EmptyCart, StatusCode::CONFLICT),
            (
                DomainError::VehicleUnavailable { vehicle_id: Uuid::nil() },
                StatusCode::CONFLICT,
            ),
            (DomainError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (DomainError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(error_response(err).0, status);
        }
    }

    #[test]
    fn checkout_failure_hides_cause() {
        let (status, Json(body)) = error_response(DomainError::CheckoutFailed {
            stage: CheckoutStage::ItemsCreated,
            cause: "constraint violated on order_items".into(),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Failed to place order"));
        assert!(!body.success);
    }
}
