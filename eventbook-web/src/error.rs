//! HTTP mapping for the core error taxonomy

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use eventbook_core::AuthError;
use serde_json::json;
use tracing::error;

/// Core error carried to the HTTP boundary.
///
/// Authentication failures stay merged (401, no cause detail beyond the
/// fixed message); authorization failures are distinguishable (403).
#[derive(Debug)]
pub struct ApiError(pub AuthError);

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.0 {
            AuthError::MissingAuthHeader => (
                StatusCode::UNAUTHORIZED,
                "not_authenticated",
                "Not authenticated".to_string(),
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid token".to_string(),
            ),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid login name or password".to_string(),
            ),
            AuthError::Forbidden => (
                StatusCode::FORBIDDEN,
                "forbidden",
                "Forbidden".to_string(),
            ),
            AuthError::NameTaken => (
                StatusCode::BAD_REQUEST,
                "name_taken",
                "Login name already taken".to_string(),
            ),
            AuthError::AlreadyExists => (
                StatusCode::BAD_REQUEST,
                "already_exists",
                "User already exists".to_string(),
            ),
            AuthError::UserNotFound => (
                StatusCode::NOT_FOUND,
                "user_not_found",
                "User not found".to_string(),
            ),
            AuthError::EventsNotFound(missing) => (
                StatusCode::NOT_FOUND,
                "events_not_found",
                format!("Events not found: {}", missing.join(",")),
            ),
            AuthError::TokenCreation | AuthError::Storage(_) => {
                error!("Internal error: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": code,
            "message": message,
        });
        if let AuthError::EventsNotFound(missing) = &self.0 {
            body["missingEventIds"] = json!(missing);
        }

        (status, Json(body)).into_response()
    }
}
