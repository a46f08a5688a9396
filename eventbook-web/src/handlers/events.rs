//! Event endpoints
//!
//! Creation requires an authenticated caller but no ownership; events
//! have no owner. Reads are public.

use super::types::{CreateEventRequest, EventSummary};
use crate::{error::ApiError, extract::AuthUser, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use eventbook_core::{AuthError, NewEvent};
use tracing::info;

/// Create an event.
pub async fn create_event(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventSummary>), ApiError> {
    info!("User '{}' creating event '{}'", caller.id, request.title);

    let event = state
        .auth
        .create_event(NewEvent {
            title: request.title,
            description: request.description,
            category: request.category,
            max_attendees: request.max_attendees,
            date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(event.into())))
}

/// Fetch an event by id.
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<EventSummary>, ApiError> {
    let event = state
        .auth
        .get_event(&event_id)
        .await?
        .ok_or(AuthError::EventsNotFound(vec![event_id]))?;

    Ok(Json(event.into()))
}
