//! Signup and login endpoints

use super::types::{LoginRequest, SignupRequest};
use crate::{error::ApiError, AppState};
use axum::{extract::State, http::StatusCode, response::Json};
use eventbook_core::AuthResult;
use tracing::info;

/// Create an account and return its first token.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResult>), ApiError> {
    info!("Signup attempt: {}", request.login_name);

    let result = state
        .auth
        .signup(&request.login_name, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// Verify credentials and return a fresh token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResult>, ApiError> {
    info!("Login attempt: {}", request.login_name);

    let result = state
        .auth
        .login(&request.login_name, &request.password)
        .await?;

    Ok(Json(result))
}
