//! Authenticated-caller extractor

use crate::{error::ApiError, AppState};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Json, Response},
};
use eventbook_core::{identity, AuthError, User};
use serde_json::json;

/// The resolved calling user.
///
/// Extraction runs the identity resolver: header parse, token decode,
/// subject lookup. Every failure, including a missing user behind a
/// valid token, is rejected as 401, so callers past this point hold a
/// live identity.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Rejection that pins all resolver failures to 401.
#[derive(Debug)]
pub struct AuthRejection(AuthError);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        // All three resolver failures are the same unauthenticated
        // outcome; only the fixed detail texts differ, never the
        // status. A storage fault still surfaces as a 500.
        let message = match &self.0 {
            AuthError::MissingAuthHeader => "Not authenticated",
            AuthError::InvalidToken => "Invalid token",
            AuthError::UserNotFound => "User not found",
            other => {
                return ApiError(AuthError::Storage(other.to_string())).into_response();
            }
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "not_authenticated",
                "message": message,
            })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok());

        let user = identity::resolve(app_state.auth.codec(), app_state.auth.users(), header)
            .await
            .map_err(AuthRejection)?;

        Ok(AuthUser(user))
    }
}
