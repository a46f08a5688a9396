//! User profile and event-membership endpoints
//!
//! Every owner-gated handler resolves the caller first (401 on any
//! resolver failure) and then checks ownership against the path id
//! (403 on mismatch), so an unauthenticated request never reaches the
//! ownership comparison.

use super::types::{CreateUserRequest, EventSummary, UpdateUserEventsRequest};
use crate::{error::ApiError, extract::AuthUser, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use eventbook_core::{authorize_owner, UserSummary};
use tracing::info;

/// Legacy creation path with a caller-supplied id. No token issued.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserSummary>), ApiError> {
    info!("Creating user with explicit id: {}", request.user_id);

    let summary = state
        .auth
        .create_user_with_id(
            &request.user_id,
            &request.login_name,
            &request.password,
            &request.event_ids,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(summary)))
}

/// Profile view, owner only.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    AuthUser(caller): AuthUser,
) -> Result<Json<UserSummary>, ApiError> {
    authorize_owner(&caller, &user_id)?;

    let summary = state.auth.user_summary(&user_id).await?;
    Ok(Json(summary))
}

/// The caller's event list, fully resolved. Owner only.
pub async fn get_user_events(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    AuthUser(caller): AuthUser,
) -> Result<Json<Vec<EventSummary>>, ApiError> {
    authorize_owner(&caller, &user_id)?;

    let events = state.auth.list_user_events(&user_id).await?;
    Ok(Json(events.into_iter().map(EventSummary::from).collect()))
}

/// Add and remove events from the membership set. Owner only; no
/// partial writes when any added id is unresolved.
pub async fn update_user_events(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    AuthUser(caller): AuthUser,
    Json(request): Json<UpdateUserEventsRequest>,
) -> Result<Json<UserSummary>, ApiError> {
    authorize_owner(&caller, &user_id)?;

    let summary = state
        .auth
        .update_membership(&user_id, &request.add_event_ids, &request.remove_event_ids)
        .await?;

    Ok(Json(summary))
}
