//! Authentication middleware for Axum
//!
//! Verifies the bearer token, resolves the user's roles and attaches a
//! [`RequestContext`] to the request for handlers to extract.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error};

use crate::domain::identity::RequestContext;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig};
use crate::interfaces::http::common::ApiResponse;

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    InvalidSubject,
    RoleLookupFailed,
}

/// State needed to authenticate a request
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub repos: Arc<dyn RepositoryProvider>,
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Bearer-token authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };
    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let claims = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "Rejected bearer token");
            return auth_error_response(AuthError::InvalidToken);
        }
    };
    let Some(user_id) = claims.user_id() else {
        return auth_error_response(AuthError::InvalidSubject);
    };

    let roles = match auth_state.repos.roles().roles_for(user_id).await {
        Ok(roles) => roles,
        Err(e) => {
            error!(%user_id, error = %e, "Failed to load roles");
            return auth_error_response(AuthError::RoleLookupFailed);
        }
    };

    request
        .extensions_mut()
        .insert(RequestContext::new(user_id, roles));
    next.run(request).await
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::InvalidSubject => (StatusCode::UNAUTHORIZED, "Token subject is not a user id"),
        AuthError::RoleLookupFailed => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
    };

    (status, Json(ApiResponse::<()>::error(message))).into_response()
}
